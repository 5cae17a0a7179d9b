use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

/// Per-connection behavior of the test server, applied in accept order.
/// Responses always close the connection, so each logical call maps to
/// exactly one accepted connection.
#[derive(Clone)]
pub struct ServerPlan {
    /// Sleep before responding; connections cycle through this schedule.
    pub delays: Vec<Duration>,
    /// The first N accepted connections never respond, forcing the client
    /// to hit its timeout.
    pub hang_connections: usize,
    pub status_line: &'static str,
    pub body: &'static str,
}

impl Default for ServerPlan {
    fn default() -> Self {
        Self {
            delays: vec![Duration::ZERO],
            hang_connections: 0,
            status_line: "HTTP/1.1 200 OK",
            body: "OK",
        }
    }
}

struct InFlightGauge {
    current: AtomicUsize,
    max: AtomicUsize,
}

impl InFlightGauge {
    fn enter(&self) {
        let now = self
            .current
            .fetch_add(1, Ordering::SeqCst)
            .saturating_add(1);
        self.max.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
    gauge: Arc<InFlightGauge>,
}

impl ServerHandle {
    /// Highest number of connections that were open at the same instant.
    pub fn max_in_flight(&self) -> usize {
        self.gauge.max.load(Ordering::SeqCst)
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server for tests.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server(plan: ServerPlan) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let gauge = Arc::new(InFlightGauge {
        current: AtomicUsize::new(0),
        max: AtomicUsize::new(0),
    });

    let accept_gauge = Arc::clone(&gauge);
    let handle = thread::spawn(move || {
        let mut accepted: usize = 0;
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let plan = plan.clone();
                    let conn_gauge = Arc::clone(&accept_gauge);
                    let conn_index = accepted;
                    accepted = accepted.saturating_add(1);
                    thread::spawn(move || handle_client(stream, &plan, conn_index, &conn_gauge));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
            gauge,
        },
    ))
}

fn handle_client(
    mut stream: TcpStream,
    plan: &ServerPlan,
    conn_index: usize,
    gauge: &InFlightGauge,
) {
    gauge.enter();

    let mut buffer = [0u8; 2048];
    if stream.read(&mut buffer).is_err() {
        gauge.exit();
        return;
    }

    if conn_index < plan.hang_connections {
        // Hold the connection open without answering until well past any
        // client timeout; the test process exits regardless.
        thread::sleep(Duration::from_secs(40));
        gauge.exit();
        return;
    }

    let delay = plan
        .delays
        .get(conn_index.checked_rem(plan.delays.len()).unwrap_or(0))
        .copied()
        .unwrap_or(Duration::ZERO);
    if delay > Duration::ZERO {
        thread::sleep(delay);
    }

    let response = format!(
        "{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        plan.status_line,
        plan.body.len(),
        plan.body
    );
    let write_result = stream.write_all(response.as_bytes());
    gauge.exit();
    if write_result.is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

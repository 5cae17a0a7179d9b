mod support;

use std::future::Future;
use std::time::{Duration, Instant};

use support::{ServerPlan, spawn_http_server};
use volley::args::{CallCount, ConcurrencyLimit, HttpMethod, TimeoutSecs};
use volley::runner::{CallOutcome, RunConfig, RunResult, run_all};

fn make_config(
    url: &str,
    count: u32,
    concurrency: u32,
    timeout_secs: u32,
) -> Result<RunConfig, String> {
    Ok(RunConfig {
        target_url: url.to_owned(),
        method: HttpMethod::Get,
        headers: vec![],
        body: String::new(),
        call_count: CallCount::try_from(count).map_err(|err| err.to_string())?,
        concurrency_limit: ConcurrencyLimit::try_from(concurrency)
            .map_err(|err| err.to_string())?,
        timeout: TimeoutSecs::try_from(timeout_secs).map_err(|err| err.to_string())?,
    })
}

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn assert_indices_complete(result: &RunResult, count: u32) -> Result<(), String> {
    if result.len() != usize::try_from(count).map_err(|err| err.to_string())? {
        return Err(format!("Expected {} results, got {}", count, result.len()));
    }
    for (position, call) in result.calls.iter().enumerate() {
        let expected = u32::try_from(position)
            .map_err(|err| err.to_string())?
            .saturating_add(1);
        if call.call_index != expected {
            return Err(format!(
                "Expected index {} at position {}, got {}",
                expected, position, call.call_index
            ));
        }
    }
    Ok(())
}

#[test]
fn run_yields_complete_ordered_results() -> Result<(), String> {
    run_async_test(async {
        let (url, _server) = spawn_http_server(ServerPlan::default())?;
        let config = make_config(&url, 25, 8, 5)?;

        let result = run_all(&config).await.map_err(|err| err.to_string())?;

        assert_indices_complete(&result, 25)?;
        for call in &result.calls {
            match call.outcome {
                CallOutcome::Success {
                    status_code,
                    ref body_preview,
                } => {
                    if status_code != 200 {
                        return Err(format!("Unexpected status: {}", status_code));
                    }
                    if body_preview != "OK" {
                        return Err(format!("Unexpected preview: {}", body_preview));
                    }
                }
                CallOutcome::Failure { ref error } => {
                    return Err(format!("Unexpected failure: {}", error));
                }
            }
        }
        Ok(())
    })
}

#[test]
fn concurrency_cap_is_never_exceeded() -> Result<(), String> {
    run_async_test(async {
        let plan = ServerPlan {
            delays: vec![Duration::from_millis(100)],
            ..ServerPlan::default()
        };
        let (url, server) = spawn_http_server(plan)?;
        let config = make_config(&url, 5, 2, 5)?;

        let result = run_all(&config).await.map_err(|err| err.to_string())?;

        assert_indices_complete(&result, 5)?;
        for call in &result.calls {
            if !call.is_success() {
                return Err(format!("Unexpected failure: {}", call.response_preview()));
            }
            if call.elapsed_secs() < 0.09 {
                return Err(format!(
                    "Call {} finished implausibly fast: {}s",
                    call.call_index,
                    call.elapsed_secs()
                ));
            }
        }

        let peak = server.max_in_flight();
        if peak > 2 {
            return Err(format!("Concurrency cap exceeded: {} in flight", peak));
        }
        if peak == 0 {
            return Err("Gauge never observed a connection".to_owned());
        }
        Ok(())
    })
}

#[test]
fn one_timeout_does_not_abort_siblings() -> Result<(), String> {
    run_async_test(async {
        let plan = ServerPlan {
            hang_connections: 1,
            ..ServerPlan::default()
        };
        let (url, _server) = spawn_http_server(plan)?;
        let config = make_config(&url, 3, 3, 1)?;

        let result = run_all(&config).await.map_err(|err| err.to_string())?;

        assert_indices_complete(&result, 3)?;
        let failures: Vec<_> = result
            .calls
            .iter()
            .filter(|call| !call.is_success())
            .collect();
        if failures.len() != 1 {
            return Err(format!("Expected exactly one failure, got {}", failures.len()));
        }
        let failed = failures.first().ok_or("missing failure")?;
        if !failed.response_preview().contains("timed out") {
            return Err(format!("Unexpected error: {}", failed.response_preview()));
        }
        if failed.elapsed != Duration::ZERO {
            return Err("Failed calls report zero elapsed time".to_owned());
        }
        Ok(())
    })
}

#[test]
fn results_sort_by_index_despite_reverse_completion() -> Result<(), String> {
    run_async_test(async {
        let plan = ServerPlan {
            delays: vec![
                Duration::from_millis(400),
                Duration::from_millis(300),
                Duration::from_millis(200),
                Duration::from_millis(100),
            ],
            ..ServerPlan::default()
        };
        let (url, _server) = spawn_http_server(plan)?;
        let config = make_config(&url, 4, 4, 5)?;

        let result = run_all(&config).await.map_err(|err| err.to_string())?;

        assert_indices_complete(&result, 4)?;
        Ok(())
    })
}

#[test]
fn never_responding_target_fails_within_timeout() -> Result<(), String> {
    run_async_test(async {
        let plan = ServerPlan {
            hang_connections: 10,
            ..ServerPlan::default()
        };
        let (url, _server) = spawn_http_server(plan)?;
        let config = make_config(&url, 1, 1, 1)?;

        let start = Instant::now();
        let result = run_all(&config).await.map_err(|err| err.to_string())?;
        let wall = start.elapsed();

        assert_indices_complete(&result, 1)?;
        let call = result.calls.first().ok_or("missing result")?;
        if call.is_success() {
            return Err("Expected the hung call to fail".to_owned());
        }
        if wall > Duration::from_secs(5) {
            return Err(format!("Timeout took too long: {:?}", wall));
        }
        Ok(())
    })
}

#[test]
fn single_call_run_degenerates_cleanly() -> Result<(), String> {
    run_async_test(async {
        let (url, _server) = spawn_http_server(ServerPlan::default())?;
        let config = make_config(&url, 1, 50, 5)?;

        let result = run_all(&config).await.map_err(|err| err.to_string())?;

        assert_indices_complete(&result, 1)?;
        let call = result.calls.first().ok_or("missing result")?;
        if !call.is_success() {
            return Err(format!("Unexpected failure: {}", call.response_preview()));
        }
        Ok(())
    })
}

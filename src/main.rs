use volley::entry;
use volley::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}

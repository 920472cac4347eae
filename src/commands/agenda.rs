use anyhow::Result;
use coachcal_core::config::CoachCalConfig;

use super::{load_calendar, print_load_warnings};

pub async fn run(config: &CoachCalConfig, coach_id: &str, json: bool) -> Result<()> {
    let ((_feed, buffer), report) = load_calendar(config, coach_id).await?;

    {
        let buffer = buffer.borrow();
        if json {
            println!("{}", serde_json::to_string_pretty(buffer.delivered())?);
        } else {
            println!("{}", buffer.surface().render(None));
        }
    }

    print_load_warnings(&report);
    Ok(())
}

use anyhow::Result;
use coachcal_core::Group;
use coachcal_core::config::CoachCalConfig;
use owo_colors::OwoColorize;

use crate::utils::with_spinner;

pub async fn run(config: &CoachCalConfig, coach_id: &str) -> Result<()> {
    let source = config.source.open()?;

    let groups = with_spinner("Loading groups", source.groups_for_coach(coach_id)).await?;
    if groups.is_empty() {
        println!("{}", format!("No groups for coach {coach_id}").dimmed());
        return Ok(());
    }

    for group in &groups {
        println!("{}", render_group(group));
    }

    Ok(())
}

fn render_group(group: &Group) -> String {
    match group.capacity {
        Some(capacity) => format!("{}  {} {}", group.id.dimmed(), group.name, format!("({capacity} places)").dimmed()),
        None => format!("{}  {}", group.id.dimmed(), group.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_line_shows_id_and_name() {
        let mut group = Group::new("g1", "Juniors");
        let line = render_group(&group);
        assert!(line.contains("g1"));
        assert!(line.contains("Juniors"));
        assert!(!line.contains("places"));

        group.capacity = Some(12);
        assert!(render_group(&group).contains("(12 places)"));
    }
}

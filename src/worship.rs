//! Predefined worship tasks offered on the worship page

use crate::task::{Priority, Task, Weekday};

/// A worship task template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorshipPreset {
    pub title: &'static str,
    pub description: &'static str,
}

pub const WORSHIP_PRESETS: [WorshipPreset; 9] = [
    WorshipPreset {
        title: "Fajr Prayer",
        description: "Perform Fajr prayer and 2 sunnah raka'ahs",
    },
    WorshipPreset {
        title: "Dhuhur Prayer",
        description: "Perform Dhuhur prayer and 4 sunnah raka'ahs",
    },
    WorshipPreset {
        title: "Asr Prayer",
        description: "Perform Asr prayer and 2 sunnah raka'ahs",
    },
    WorshipPreset {
        title: "Maghrib Prayer",
        description: "Perform Maghrib prayer and 2 sunnah raka'ahs",
    },
    WorshipPreset {
        title: "Isha Prayer",
        description: "Perform Isha prayer and 2 sunnah raka'ahs",
    },
    WorshipPreset {
        title: "Quran Reading",
        description: "Read at least 1 page of Quran",
    },
    WorshipPreset {
        title: "Dhikr",
        description: "Morning and evening adhkar",
    },
    WorshipPreset {
        title: "Dua",
        description: "Make personal dua and pray for others",
    },
    WorshipPreset {
        title: "Charity",
        description: "Give sadaqah (charity) if possible",
    },
];

impl WorshipPreset {
    /// New high-priority task for `day`
    pub fn to_task(&self, day: Weekday) -> Task {
        Task::new(self.title, Priority::High, day).with_description(self.description)
    }
}

/// Append `preset` for `day` unless an identical title is already planned that day
///
/// Returns whether a task was added.
pub fn add_worship_task(tasks: &mut Vec<Task>, preset: &WorshipPreset, day: Weekday) -> bool {
    if tasks.iter().any(|t| t.day == day && t.title == preset.title) {
        return false;
    }
    log::info!("Added worship task '{}' for {}", preset.title, day.as_str());
    tasks.push(preset.to_task(day));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_task() {
        let task = WORSHIP_PRESETS[0].to_task(Weekday::Friday);
        assert_eq!(task.title, "Fajr Prayer");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.day, Weekday::Friday);
        assert!(!task.completed);
        assert!(!task.description.is_empty());
    }

    #[test]
    fn test_add_skips_duplicates_per_day() {
        let mut tasks = Vec::new();
        let quran = &WORSHIP_PRESETS[5];
        assert!(add_worship_task(&mut tasks, quran, Weekday::Monday));
        assert!(!add_worship_task(&mut tasks, quran, Weekday::Monday));
        assert!(add_worship_task(&mut tasks, quran, Weekday::Tuesday));
        assert_eq!(tasks.len(), 2);
    }
}

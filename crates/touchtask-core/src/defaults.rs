//! Seed content for first runs and the demo data set.

use jiff::Timestamp;

use crate::{
    ids::generate_id,
    models::{
        Column, LedgerTask, Meeting, Priority, Recurrence, RecurringBlock, Reminder, Subtask,
        TemplateSet, TimeOfDay,
    },
};

/// (title, minutes, optional)
type SubtaskSeed = (&'static str, u32, bool);

struct BlockSeed {
    title: &'static str,
    description: &'static str,
    start: (u8, u8),
    end: (u8, u8),
    category: &'static str,
    tags: [&'static str; 2],
    days: &'static [u8],
    subtasks: &'static [SubtaskSeed],
}

const WEEKDAYS: &[u8] = &[1, 2, 3, 4, 5];

const BLOCKS: &[BlockSeed] = &[
    BlockSeed {
        title: "Morning Identity Primer",
        description: "Start your day with intention",
        start: (6, 0),
        end: (6, 20),
        category: "habit",
        tags: ["morning", "mindset"],
        days: WEEKDAYS,
        subtasks: &[
            ("Open curtains", 1, false),
            ("Place water bottle on desk", 1, false),
            ("Lay out workout clothes", 1, true),
            ("Drink full glass of water", 2, false),
            ("Identity statement", 1, false),
            ("Micro-journaling: priorities + if-then plan", 8, false),
            ("5 slow breaths + 10 squats", 4, false),
        ],
    },
    BlockSeed {
        title: "Clean Start Work Launch",
        description: "Prepare for focused work",
        start: (8, 0),
        end: (8, 15),
        category: "focus",
        tags: ["work", "setup"],
        days: WEEKDAYS,
        subtasks: &[
            ("Close unnecessary tabs/apps", 3, false),
            ("Put phone out of reach", 1, false),
            ("Write first tiny action", 2, false),
            ("Start focus playlist/coffee", 2, true),
            ("Set timer", 1, false),
            ("Open only required files/tools", 5, false),
        ],
    },
    BlockSeed {
        title: "Deep Work Cycle",
        description: "Single-task focus sprint",
        start: (8, 30),
        end: (9, 30),
        category: "focus",
        tags: ["pomodoro", "deep-work"],
        days: WEEKDAYS,
        subtasks: &[
            ("Pre-commit: define stop condition", 2, false),
            ("Focus sprint", 40, false),
            ("Scoreboard tick", 1, false),
            ("Quick desk reset", 3, false),
            ("Recovery break: walk/stretch/water", 7, false),
        ],
    },
    BlockSeed {
        title: "Movement Minimum",
        description: "Daily movement habit",
        start: (12, 0),
        end: (12, 20),
        category: "health",
        tags: ["exercise", "movement"],
        days: WEEKDAYS,
        subtasks: &[
            ("Put on shoes / warmup", 2, false),
            ("Core activity (walk/mobility/strength)", 15, false),
            ("Log it", 2, false),
        ],
    },
    BlockSeed {
        title: "Meal & Health Autopilot",
        description: "Healthy eating routine",
        start: (12, 30),
        end: (13, 0),
        category: "health",
        tags: ["nutrition", "meal"],
        days: WEEKDAYS,
        subtasks: &[
            ("Make healthy default visible", 2, false),
            ("Prep micro-step", 8, true),
            ("Eat: protein + fiber first", 15, false),
            ("Quick cleanup", 3, false),
        ],
    },
    BlockSeed {
        title: "Evening Shutdown",
        description: "Close the day intentionally",
        start: (18, 0),
        end: (18, 30),
        category: "habit",
        tags: ["evening", "shutdown"],
        days: WEEKDAYS,
        subtasks: &[
            ("Shutdown complete + close laptop", 2, false),
            ("Plan tomorrow: top 1-3 tasks", 7, false),
            ("Reset environment: desk/clothes/water", 8, false),
            ("Phone charges outside bedroom", 2, false),
            ("Wind-down: book/stretch/breaths", 5, true),
        ],
    },
    BlockSeed {
        title: "Weekly Review & Habit Shaping",
        description: "Review and adjust systems",
        start: (10, 0),
        end: (10, 45),
        category: "planning",
        tags: ["weekly", "review"],
        days: &[0],
        subtasks: &[
            ("Review scoreboard: count checkmarks", 8, false),
            ("Identify success patterns", 5, false),
            ("Lower friction: pre-pack/automate/simplify", 10, false),
            ("Raise friction for negatives", 5, true),
            ("Choose 1 habit experiment", 7, false),
            ("Write implementation intentions", 5, false),
        ],
    },
    BlockSeed {
        title: "Social & Recovery",
        description: "Connection and deliberate rest",
        start: (19, 0),
        end: (19, 30),
        category: "personal",
        tags: ["social", "recovery"],
        days: WEEKDAYS,
        subtasks: &[
            ("Send appreciation message", 4, false),
            ("Deliberate rest: walk/hobby/stretching", 20, false),
            ("Done ritual: tea/shower/reflection", 5, true),
        ],
    },
];

/// (title, category, priority)
const TASKS: &[(&str, &str, Priority)] = &[
    ("Welcome to TouchTask!", "Getting Started", Priority::Normal),
    ("Record a demo video", "Marketing", Priority::High),
    ("Publish video", "Marketing", Priority::Normal),
    ("Open Source TouchTask", "Development", Priority::High),
    ("Deploy TouchTask with GitHub Pages", "Development", Priority::Normal),
];

const REMINDERS: &[&str] = &["Buy Milk", "Buy Eggs", "Follow up on Jim's email"];

/// (time, title)
const MEETINGS: &[((u8, u8), &str)] = &[((14, 0), "Call Jim")];

fn time_of_day((hour, minute): (u8, u8)) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap_or(TimeOfDay::MIDNIGHT)
}

impl BlockSeed {
    fn build(&self) -> RecurringBlock {
        let start_time = time_of_day(self.start);
        let end_time = time_of_day(self.end);
        RecurringBlock {
            id: generate_id(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            start_time,
            end_time,
            duration_minutes: start_time.minutes_until(end_time),
            category: self.category.to_string(),
            tags: self.tags.iter().map(|tag| (*tag).to_string()).collect(),
            recurrence: Recurrence::from_days(self.days.iter().copied())
                .unwrap_or_else(|_| Recurrence::weekdays()),
            subtasks: self
                .subtasks
                .iter()
                .map(|(title, minutes, optional)| Subtask {
                    id: generate_id(),
                    title: (*title).to_string(),
                    duration_minutes: *minutes,
                    optional: *optional,
                })
                .collect(),
        }
    }
}

/// The starter routine, with freshly generated ids.
pub fn default_templates() -> TemplateSet {
    TemplateSet::new(BLOCKS.iter().map(BlockSeed::build).collect())
}

/// Starter board entries, all in the backlog.
pub fn default_tasks(now: Timestamp) -> Vec<LedgerTask> {
    TASKS
        .iter()
        .map(|(title, category, priority)| LedgerTask {
            id: generate_id(),
            title: (*title).to_string(),
            category: (*category).to_string(),
            priority: *priority,
            column: Column::Backlog,
            time_logged_minutes: 0,
            created_at: now,
            completed_at: None,
        })
        .collect()
}

/// Sample reminders for the demo data set.
pub fn demo_reminders() -> Vec<Reminder> {
    REMINDERS
        .iter()
        .map(|text| Reminder {
            id: generate_id(),
            text: (*text).to_string(),
        })
        .collect()
}

/// Sample meetings for the demo data set; they land on the current day.
pub fn demo_meetings() -> Vec<Meeting> {
    MEETINGS
        .iter()
        .map(|(time, title)| Meeting {
            id: generate_id(),
            time: time_of_day(*time),
            title: (*title).to_string(),
            description: String::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_default_templates_are_well_formed() {
        let templates = default_templates();
        assert_eq!(templates.len(), 8);

        let mut ids = HashSet::new();
        for block in &templates.blocks {
            assert!(ids.insert(block.id.clone()), "duplicate block id");
            assert_eq!(block.duration_minutes, block.window_minutes());
            assert!(!block.recurrence.is_empty());
            for subtask in &block.subtasks {
                assert!(ids.insert(subtask.id.clone()), "duplicate subtask id");
            }
        }

        let review = templates
            .blocks
            .iter()
            .find(|b| b.title == "Weekly Review & Habit Shaping")
            .expect("weekly review seeded");
        assert_eq!(review.recurrence.days().collect::<Vec<_>>(), vec![0]);
        assert_eq!(review.duration_minutes, 45);
    }

    #[test]
    fn test_default_tasks_start_in_backlog() {
        let now = Timestamp::from_second(1_760_000_000).expect("valid timestamp");
        let tasks = default_tasks(now);
        assert_eq!(tasks.len(), 5);
        assert!(tasks.iter().all(|t| t.column == Column::Backlog && t.completed_at.is_none()));
        assert_eq!(tasks.iter().filter(|t| t.priority == Priority::High).count(), 2);
    }

    #[test]
    fn test_demo_agenda() {
        let reminders = demo_reminders();
        assert_eq!(reminders.len(), 3);
        assert_eq!(reminders[0].text, "Buy Milk");

        let meetings = demo_meetings();
        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].time.to_string(), "14:00");
        assert_eq!(meetings[0].title, "Call Jim");
    }
}

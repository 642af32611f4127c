//! Some utility functions

use chrono::{DateTime, Local};

use crate::task::Task;
use crate::task_list::view::ListView;

/// One line describing a task
pub fn format_task(task: &Task) -> String {
    let completion = if task.completed() { "✓" } else { " " };
    let date = task.estimate_at().with_timezone(&Local).format("%a %d/%m");
    format!("    {} {}\t{}\t{}", completion, task.description(), date, task.id())
}

pub fn print_task(task: &Task) {
    println!("{}", format_task(task));
}

/// A debug utility that pretty-prints what a list displays
pub fn print_list_view(title: &str, today: DateTime<Local>, view: &ListView) {
    println!("{} - {}", title, today.format("%a, %-d %B"));
    if view.visible_tasks.is_empty() {
        println!("    (nothing to do)");
    }
    for task in &view.visible_tasks {
        print_task(task);
    }
    println!("{}", view);
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::task::TaskId;

    #[test]
    fn task_lines() {
        let date = Utc.ymd(2024, 1, 10).and_hms(12, 0, 0);
        let pending = Task::new(TaskId::from(1), "Buy milk".to_string(), date, None);
        let done = Task::new(TaskId::from(2), "Pay rent".to_string(), date, Some(date));

        assert!(format_task(&pending).starts_with("      Buy milk\t"));
        assert!(format_task(&pending).ends_with("\t1"));
        assert!(format_task(&done).starts_with("    ✓ Pay rent\t"));
    }
}

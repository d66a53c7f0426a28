//! Terminal rendering for the `list` command

use std::collections::{HashMap, HashSet};

use colored::*;

use crate::api::{Checklist, Note, Task};

/// Order a flat task list depth-first, siblings by position
///
/// Returns `(depth, task)` pairs. Tasks whose parent is not in the list are shown at the
/// top level, and so are tasks caught in a parent cycle, after everything else.
pub fn task_tree(tasks: &[Task]) -> Vec<(usize, &Task)> {
    let ids: HashSet<u64> = tasks.iter().map(|t| t.id).collect();
    let mut by_parent: HashMap<Option<u64>, Vec<&Task>> = HashMap::new();
    for task in tasks {
        let parent = task.parent().filter(|p| ids.contains(p) && *p != task.id);
        by_parent.entry(parent).or_default().push(task);
    }
    for siblings in by_parent.values_mut() {
        siblings.sort_by_key(|t| (t.position, t.id));
    }

    let mut out = Vec::with_capacity(tasks.len());
    let mut seen = HashSet::new();
    let roots = by_parent.get(&None).cloned().unwrap_or_default();
    walk(&roots, &by_parent, &mut seen, &mut out);

    // Unreachable from any root: the parent chain loops back on itself
    for task in tasks {
        if !seen.contains(&task.id) {
            walk(&[task], &by_parent, &mut seen, &mut out);
        }
    }
    out
}

fn walk<'a>(
    roots: &[&'a Task],
    by_parent: &HashMap<Option<u64>, Vec<&'a Task>>,
    seen: &mut HashSet<u64>,
    out: &mut Vec<(usize, &'a Task)>,
) {
    let mut stack: Vec<(usize, &Task)> = roots.iter().rev().map(|t| (0, *t)).collect();
    while let Some((depth, task)) = stack.pop() {
        if !seen.insert(task.id) {
            continue;
        }
        out.push((depth, task));
        if let Some(children) = by_parent.get(&Some(task.id)) {
            stack.extend(children.iter().rev().map(|t| (depth + 1, *t)));
        }
    }
}

/// One line describing a checklist
pub fn checklist_line(list: &Checklist) -> String {
    let mut line = format!(
        "{:>8}  {}  {}",
        list.id.to_string().yellow(),
        list.name.bold(),
        format!("{}/{} done", list.task_completed, list.task_count).dimmed()
    );
    if list.archived {
        line.push_str(&format!("  {}", "archived".dimmed()));
    }
    if list.read_only {
        line.push_str(&format!("  {}", "read-only".dimmed()));
    }
    line
}

/// One line describing a task at a tree depth
pub fn task_line(depth: usize, task: &Task) -> String {
    let indent = "  ".repeat(depth);
    let marker = if task.status == 0 { "-".normal() } else { "✓".green() };
    let mut line = format!("{indent}{marker} {} {}", task.content, format!("#{}", task.id).dimmed());
    if task.comments_count > 0 {
        line.push_str(&format!(" {}", format!("({} notes)", task.comments_count).cyan()));
    }
    line
}

/// Note lines, indented under their task
pub fn note_lines(depth: usize, note: &Note) -> Vec<String> {
    let indent = "  ".repeat(depth + 1);
    note.comment
        .lines()
        .map(|l| format!("{indent}{} {}", "|".dimmed(), l))
        .collect()
}

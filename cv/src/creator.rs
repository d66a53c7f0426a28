//! Creation orchestrator: turns a parsed structure into remote tasks
//!
//! Calls are strictly sequential: parent, then children in position order, then the note.
//! The first failure stops everything after it. Whatever was created before the failure
//! stays on the server.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::api::{ApiError, CheckvistApi, NewTask, Note, Task, TaskRef};
use crate::parser::ParsedStructure;

/// Which creation call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStep {
    Parent,
    Child { position: u32 },
    Note,
}

impl fmt::Display for CreationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationStep::Parent => write!(f, "parent task"),
            CreationStep::Child { position } => write!(f, "child task at position {position}"),
            CreationStep::Note => write!(f, "note"),
        }
    }
}

/// Errors from creating a hierarchy
#[derive(Debug, Error)]
pub enum CreateError {
    #[error("Failed to create {step}: {source}")]
    RemoteCall {
        step: CreationStep,
        #[source]
        source: ApiError,
    },
}

impl CreateError {
    pub fn step(&self) -> CreationStep {
        match self {
            CreateError::RemoteCall { step, .. } => *step,
        }
    }
}

/// Everything created by a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedHierarchy {
    pub parent: TaskRef,
    pub children: Vec<TaskRef>,
    pub note: Option<Note>,
}

/// Creates a parent task, its children and its note in one checklist
pub struct HierarchyCreator<'a, A: CheckvistApi + ?Sized> {
    api: &'a A,
    list_id: u64,
}

impl<'a, A: CheckvistApi + ?Sized> HierarchyCreator<'a, A> {
    pub fn new(api: &'a A, list_id: u64) -> Self {
        Self { api, list_id }
    }

    /// Created tasks live in our checklist whatever the response says
    fn task_ref(&self, task: &Task) -> TaskRef {
        TaskRef {
            id: task.id,
            checklist_id: self.list_id,
        }
    }

    /// Create the whole structure, stopping at the first failed call
    pub async fn create(&self, structure: &ParsedStructure) -> Result<CreatedHierarchy, CreateError> {
        debug!(
            list_id = self.list_id,
            title = %structure.title,
            children = structure.children.len(),
            has_note = structure.has_note(),
            "HierarchyCreator::create: called"
        );

        let created = self
            .api
            .create_task(&NewTask::top_level(&structure.title), self.list_id)
            .await
            .map_err(|source| CreateError::RemoteCall {
                step: CreationStep::Parent,
                source,
            })?;
        let parent = self.task_ref(&created);
        info!(id = parent.id, title = %structure.title, "Created parent task");

        let mut children = Vec::with_capacity(structure.children.len());
        for child in &structure.children {
            let step = CreationStep::Child {
                position: child.position,
            };
            let task = NewTask::child(&child.text, parent, child.position);
            let created = self
                .api
                .create_task(&task, self.list_id)
                .await
                .map_err(|source| CreateError::RemoteCall { step, source })?;
            info!(id = created.id, position = child.position, "Created child task");
            children.push(self.task_ref(&created));
        }

        let note = if structure.has_note() {
            let note = self
                .api
                .create_note(&structure.note, parent)
                .await
                .map_err(|source| CreateError::RemoteCall {
                    step: CreationStep::Note,
                    source,
                })?;
            info!(id = note.id, task_id = parent.id, "Created note");
            Some(note)
        } else {
            debug!("HierarchyCreator::create: no note to create");
            None
        };

        Ok(CreatedHierarchy {
            parent,
            children,
            note,
        })
    }
}

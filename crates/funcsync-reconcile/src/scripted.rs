//! Scripted decision-maker for tests
//!
//! Plays back a fixed script of answers and records every prompt message.
//! An unscripted prompt panics, so "no prompt was issued" is a hard
//! assertion rather than a silent default.

use std::collections::VecDeque;

use crate::error::{ReconcileError, ReconcileResult};
use crate::interact::{Choice, DecisionMaker, PickOption};

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum ScriptedAnswer {
    /// Answer the next four-way confirmation.
    Confirm(Choice),
    /// Accept the next single-affirmative confirmation.
    Acknowledge,
    /// Answer the next picker with exactly these labels.
    Pick(Vec<String>),
    /// Dismiss the next prompt of any kind.
    Cancel,
}

impl ScriptedAnswer {
    /// Convenience constructor for [`ScriptedAnswer::Pick`].
    pub fn pick<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedAnswer::Pick(labels.into_iter().map(Into::into).collect())
    }
}

/// Decision-maker that replays a script.
#[derive(Debug, Default)]
pub struct ScriptedDecisions {
    script: VecDeque<ScriptedAnswer>,
    prompts: Vec<String>,
    /// Options offered to each picker, in call order.
    offered: Vec<Vec<PickOption>>,
}

impl ScriptedDecisions {
    pub fn new(script: Vec<ScriptedAnswer>) -> Self {
        Self {
            script: script.into(),
            prompts: Vec::new(),
            offered: Vec::new(),
        }
    }

    /// A script with no answers: the pass under test must not prompt at all.
    pub fn expecting_no_prompts() -> Self {
        Self::new(Vec::new())
    }

    /// Every prompt and picker message seen so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// The option lists offered to pickers, in call order.
    pub fn offered(&self) -> &[Vec<PickOption>] {
        &self.offered
    }

    fn next_answer(&mut self, message: &str) -> ScriptedAnswer {
        self.prompts.push(message.to_string());
        self.script
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted prompt: {message}"))
    }
}

impl DecisionMaker for ScriptedDecisions {
    fn confirm(&mut self, message: &str) -> ReconcileResult<Choice> {
        match self.next_answer(message) {
            ScriptedAnswer::Confirm(choice) => Ok(choice),
            ScriptedAnswer::Cancel => Err(ReconcileError::Cancelled),
            other => panic!("expected Confirm answer for \"{message}\", script had {other:?}"),
        }
    }

    fn acknowledge(&mut self, message: &str) -> ReconcileResult<()> {
        match self.next_answer(message) {
            ScriptedAnswer::Acknowledge => Ok(()),
            ScriptedAnswer::Cancel => Err(ReconcileError::Cancelled),
            other => panic!("expected Acknowledge answer for \"{message}\", script had {other:?}"),
        }
    }

    fn pick_many(&mut self, prompt: &str, options: Vec<PickOption>) -> ReconcileResult<Vec<String>> {
        let answer = self.next_answer(prompt);
        self.offered.push(options);
        match answer {
            ScriptedAnswer::Pick(labels) => Ok(labels),
            ScriptedAnswer::Cancel => Err(ReconcileError::Cancelled),
            other => panic!("expected Pick answer for \"{prompt}\", script had {other:?}"),
        }
    }
}

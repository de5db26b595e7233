#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use ability_system::{AbilityHooks, EffectHooks, HookContext, InputPhase};
use gameplay_tags::{Tag, TagSet};

pub fn tag(text: &str) -> Tag {
    Tag::new(text).unwrap()
}

pub fn tags(texts: &[&str]) -> TagSet {
    texts.iter().map(|text| tag(text)).collect()
}

/// Shared, ordered log of hook invocations.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.0.borrow().iter().position(|e| e == entry)
    }

    pub fn recorder(&self, name: &str) -> Recorder {
        Recorder {
            name: name.to_owned(),
            journal: self.clone(),
        }
    }
}

/// Writes `"<name>:<point>"` for every lifecycle point it sees.
pub struct Recorder {
    name: String,
    journal: Journal,
}

impl Recorder {
    fn record(&self, point: &str) {
        self.journal.push(format!("{}:{point}", self.name));
    }
}

impl AbilityHooks for Recorder {
    fn on_added(&mut self, _ctx: &mut HookContext<'_>) {
        self.record("added");
    }

    fn on_removed(&mut self, _ctx: &mut HookContext<'_>) {
        self.record("removed");
    }

    fn on_activated(&mut self, _ctx: &mut HookContext<'_>) {
        self.record("activated");
    }

    fn on_finished(&mut self, _ctx: &mut HookContext<'_>) {
        self.record("finished");
    }

    fn on_cancelled(&mut self, _ctx: &mut HookContext<'_>) {
        self.record("cancelled");
    }

    fn on_cooldown_finished(&mut self, _ctx: &mut HookContext<'_>) {
        self.record("cooldown_finished");
    }

    fn on_input(&mut self, phase: InputPhase, _ctx: &mut HookContext<'_>) {
        self.record(&format!("input_{phase}"));
    }
}

impl EffectHooks for Recorder {
    fn on_applied(&mut self, _ctx: &mut HookContext<'_>) {
        self.record("applied");
    }

    fn on_removed(&mut self, _ctx: &mut HookContext<'_>) {
        self.record("removed");
    }

    fn on_triggered(&mut self, _ctx: &mut HookContext<'_>) {
        self.record("triggered");
    }
}

/// Ends its ability synchronously from `on_activated`.
pub struct FinishImmediately;

impl AbilityHooks for FinishImmediately {
    fn on_activated(&mut self, ctx: &mut HookContext<'_>) {
        ctx.finish_self();
    }
}

/// Removes another effect every time it triggers.
pub struct RemoveOnTrigger(pub Tag);

impl EffectHooks for RemoveOnTrigger {
    fn on_triggered(&mut self, ctx: &mut HookContext<'_>) {
        ctx.remove_effect(self.0.clone());
    }
}

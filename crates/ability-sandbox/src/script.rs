//! Scripted timelines played against a director on a manual clock.

use ability_content::{ContentError, ContentLibrary};
use ability_system::{AbilityDirector, DirectorEvent};
use gameplay_tags::{Tag, TagError};

/// Slack when comparing step times against the accumulated clock.
const TIME_EPSILON: f32 = 1e-4;

/// One scripted request against the director.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Unlock an ability from the library.
    Grant(Tag),
    Activate(Tag),
    Finish(Tag),
    Cancel(Tag),
    InputStarted(Tag),
    InputCompleted(Tag),
    InputCancelled(Tag),
    /// Apply an effect from the library.
    ApplyEffect(Tag),
    RemoveEffect(Tag),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub at: f32,
    pub action: Action,
}

impl Step {
    pub fn new(at: f32, action: Action) -> Self {
        Self { at, action }
    }
}

/// Steps ordered by time; steps sharing a time keep their listed order.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    steps: Vec<Step>,
}

impl Timeline {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        let mut steps: Vec<Step> = steps.into_iter().collect();
        steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { steps }
    }

    /// Walks the embedded catalog through movement, combat, a stun and a
    /// late grant.
    pub fn demo() -> Result<Self, TagError> {
        let t = Tag::new;
        Ok(Self::new([
            Step::new(0.0, Action::InputStarted(t("input.sprint")?)),
            Step::new(1.0, Action::InputStarted(t("input.dash")?)),
            Step::new(2.0, Action::InputCompleted(t("input.sprint")?)),
            Step::new(2.5, Action::Activate(t("ability.attack.heavy")?)),
            Step::new(3.0, Action::Finish(t("ability.attack.heavy")?)),
            Step::new(3.5, Action::ApplyEffect(t("effect.dot.burn")?)),
            Step::new(4.0, Action::InputStarted(t("input.guard")?)),
            Step::new(5.0, Action::InputCancelled(t("input.guard")?)),
            Step::new(6.0, Action::ApplyEffect(t("effect.stun")?)),
            // refused: the stun blocks movement until 7.5
            Step::new(6.5, Action::InputStarted(t("input.dash")?)),
            Step::new(8.0, Action::Grant(t("ability.second_wind")?)),
            Step::new(8.0, Action::Activate(t("ability.second_wind")?)),
            Step::new(9.0, Action::ApplyEffect(t("effect.fortify")?)),
            Step::new(11.0, Action::RemoveEffect(t("effect.fortify")?)),
        ]))
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Counters of one [`Sandbox::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub ticks: usize,
    pub steps: usize,
    pub events: usize,
}

pub struct Sandbox {
    library: ContentLibrary,
    director: AbilityDirector,
    timeline: Timeline,
    cursor: usize,
    history: Vec<DirectorEvent>,
}

impl Sandbox {
    /// Builds a director with every attribute and granted ability of `library`.
    pub fn new(library: ContentLibrary, timeline: Timeline) -> Result<Self, ContentError> {
        let director = library.populate(AbilityDirector::builder())?.build();
        Ok(Self {
            library,
            director,
            timeline,
            cursor: 0,
            history: Vec::new(),
        })
    }

    pub fn director(&self) -> &AbilityDirector {
        &self.director
    }

    /// Every event drained so far, in emission order.
    pub fn history(&self) -> &[DirectorEvent] {
        &self.history
    }

    /// Plays the timeline for `duration` seconds in ticks of `step`.
    ///
    /// A step that is not a positive finite number plays nothing.
    pub fn run(&mut self, step: f32, duration: f32) -> RunReport {
        if !(step.is_finite() && step > 0.0) {
            tracing::warn!(step, "run ignored, step must be positive");
            return RunReport::default();
        }
        let ticks = (duration / step).ceil() as usize;
        let mut report = RunReport::default();
        report.events += self.flush_events();

        for _ in 0..ticks {
            report.steps += self.play_due();
            report.events += self.flush_events();

            self.director.advance(step);
            report.ticks += 1;
            report.events += self.flush_events();
        }
        report.steps += self.play_due();
        report.events += self.flush_events();

        report
    }

    fn play_due(&mut self) -> usize {
        let now = self.director.now();
        let mut played = 0;
        while let Some(step) = self.timeline.steps.get(self.cursor) {
            if step.at > now + TIME_EPSILON {
                break;
            }
            let action = step.action.clone();
            self.cursor += 1;

            let accepted = self.perform(&action);
            tracing::info!(time = now, ?action, accepted, "step");
            played += 1;
        }
        played
    }

    fn perform(&mut self, action: &Action) -> bool {
        match action {
            Action::Grant(tag) => match self.library.ability_spec(tag) {
                Ok(spec) => self.director.unlock_ability(spec),
                Err(error) => {
                    tracing::warn!(%error, "grant skipped");
                    false
                }
            },
            Action::Activate(tag) => {
                if let Err(error) = self.director.check_activation(tag) {
                    tracing::info!(%error, "activation refused");
                }
                self.director.activate_ability_by_tag(tag)
            }
            Action::Finish(tag) => self.director.finish_ability_by_tag(tag, None),
            Action::Cancel(tag) => self.director.cancel_ability_by_tag(tag),
            Action::InputStarted(action) => self.director.input_started(action) > 0,
            Action::InputCompleted(action) => self.director.input_completed(action) > 0,
            Action::InputCancelled(action) => self.director.input_cancelled(action) > 0,
            Action::ApplyEffect(tag) => match self.library.effect_spec(tag) {
                Ok(spec) => self.director.add_effect(spec),
                Err(error) => {
                    tracing::warn!(%error, "effect skipped");
                    false
                }
            },
            Action::RemoveEffect(tag) => self.director.remove_effect_by_tag(tag),
        }
    }

    fn flush_events(&mut self) -> usize {
        let now = self.director.now();
        let events = self.director.drain_events();
        for event in &events {
            tracing::info!(
                time = now,
                kind = event.kind(),
                subject = %event.subject(),
                "event"
            );
        }
        let count = events.len();
        self.history.extend(events);
        count
    }
}

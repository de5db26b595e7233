mod common;

use ability_system::{
    AbilityCost, AbilityDirector, AbilityFlags, AbilitySpec, ActivationError, Attribute,
    DirectorEvent, GameplayError,
};
use common::{FinishImmediately, Journal, tag, tags};

#[test]
fn unlock_ability_tag_is_idempotent() {
    let mut director = AbilityDirector::new();

    assert!(director.unlock_ability_tag(tag("feature.glide")));
    assert!(!director.unlock_ability_tag(tag("feature.glide")));
    assert!(director.has_ability_unlocked(&tag("feature.glide")));
}

#[test]
fn unlock_rejects_duplicate_tag() {
    let mut director = AbilityDirector::new();

    assert!(director.unlock_ability(AbilitySpec::new(tag("ability.dash"))));
    assert!(!director.unlock_ability(AbilitySpec::new(tag("ability.dash"))));
    assert_eq!(director.abilities().len(), 1);
}

#[test]
fn unlock_runs_added_hooks_and_reports_binding() {
    let journal = Journal::new();
    let mut director = AbilityDirector::new();

    director.unlock_ability(
        AbilitySpec::new(tag("ability.fire"))
            .with_input_action(tag("input.primary"))
            .with_hooks(journal.recorder("fire")),
    );

    assert_eq!(journal.entries(), vec!["fire:added"]);
    assert_eq!(
        director.drain_events(),
        vec![
            DirectorEvent::InputBound {
                ability: tag("ability.fire"),
                action: tag("input.primary"),
            },
            DirectorEvent::AbilityUnlocked(tag("ability.fire")),
        ]
    );
}

#[test]
fn auto_activate_on_add() {
    let mut director = AbilityDirector::new();

    director.unlock_ability(
        AbilitySpec::new(tag("ability.aura")).with_flags(AbilityFlags::AUTO_ACTIVATE_ON_ADD),
    );

    assert!(director.has_ability_active(&tag("ability.aura")));
}

#[test]
fn activation_cancels_matching_abilities_before_payload() {
    let journal = Journal::new();
    let mut director = AbilityDirector::new();

    director.unlock_ability(
        AbilitySpec::new(tag("ability.block.raise")).with_hooks(journal.recorder("block")),
    );
    director.unlock_ability(
        AbilitySpec::new(tag("ability.attack"))
            .with_cancel_tags(tags(&["ability.block"]))
            .with_hooks(journal.recorder("attack")),
    );

    assert!(director.activate_ability_by_tag(&tag("ability.block.raise")));
    assert!(director.activate_ability_by_tag(&tag("ability.attack")));

    let cancelled = journal.position("block:cancelled").unwrap();
    let activated = journal.position("attack:activated").unwrap();
    assert!(cancelled < activated);
    assert!(!director.has_ability_active(&tag("ability.block.raise")));
    assert!(director.has_ability_active(&tag("ability.attack")));
}

#[test]
fn blocking_tags_use_exact_match() {
    let mut director = AbilityDirector::new();
    director.unlock_ability(AbilitySpec::new(tag("ability.stun.heavy")));
    director.unlock_ability(AbilitySpec::new(tag("ability.stun")));
    director.unlock_ability(
        AbilitySpec::new(tag("ability.dash")).with_blocking_tags(tags(&["ability.stun"])),
    );

    director.activate_ability_by_tag(&tag("ability.stun.heavy"));
    assert!(director.can_activate_ability(&tag("ability.dash")));

    director.activate_ability_by_tag(&tag("ability.stun"));
    assert_eq!(
        director.check_activation(&tag("ability.dash")),
        Err(ActivationError::BlockedByActive {
            tag: tag("ability.dash"),
            blocking: tag("ability.stun"),
        })
    );
    assert!(!director.activate_ability_by_tag(&tag("ability.dash")));
}

#[test]
fn finish_starts_cooldown_and_expiry_reenables() {
    let journal = Journal::new();
    let mut director = AbilityDirector::new();
    let dash = tag("ability.dash");
    director.unlock_ability(
        AbilitySpec::new(dash.clone())
            .with_cooldown(2.0)
            .with_hooks(journal.recorder("dash")),
    );

    director.activate_ability_by_tag(&dash);
    assert!(director.finish_ability_by_tag(&dash, None));
    assert!(!director.finish_ability_by_tag(&dash, None));

    director.advance(0.5);
    assert_eq!(director.get_cooldown_remaining(&dash), (1.5, 2.0));
    let error = director.check_activation(&dash).unwrap_err();
    assert_eq!(error.error_code(), "on_cooldown");
    assert_eq!(director.abilities_on_cooldown(), tags(&["ability.dash"]));

    director.advance(1.5);
    assert!(!director.is_ability_on_cooldown(&dash));
    assert_eq!(director.get_cooldown_remaining(&dash), (0.0, 0.0));
    assert_eq!(journal.count("dash:cooldown_finished"), 1);
    assert!(director.activate_ability_by_tag(&dash));
}

#[test]
fn positive_override_replaces_base_cooldown() {
    let mut director = AbilityDirector::new();
    let dash = tag("ability.dash");
    director.unlock_ability(AbilitySpec::new(dash.clone()).with_cooldown(2.0));

    director.activate_ability_by_tag(&dash);
    director.finish_ability_by_tag(&dash, Some(5.0));

    assert_eq!(director.get_cooldown_remaining(&dash), (5.0, 5.0));
}

#[test]
fn zero_cooldown_schedules_nothing() {
    let mut director = AbilityDirector::new();
    let jab = tag("ability.jab");
    director.unlock_ability(AbilitySpec::new(jab.clone()));

    director.activate_ability_by_tag(&jab);
    director.finish_ability_by_tag(&jab, None);

    assert!(!director.is_ability_on_cooldown(&jab));
    assert!(director.activate_ability_by_tag(&jab));
    assert!(
        !director
            .drain_events()
            .iter()
            .any(|event| matches!(event, DirectorEvent::CooldownStarted { .. }))
    );
}

#[test]
fn cancel_only_cools_down_when_flagged() {
    let mut director = AbilityDirector::new();
    let plain = tag("ability.plain");
    let flagged = tag("ability.flagged");
    director.unlock_ability(AbilitySpec::new(plain.clone()).with_cooldown(1.0));
    director.unlock_ability(
        AbilitySpec::new(flagged.clone())
            .with_cooldown(1.0)
            .with_flags(AbilityFlags::COOLDOWN_ON_CANCEL),
    );

    director.activate_ability_by_tag(&plain);
    director.activate_ability_by_tag(&flagged);
    assert!(director.cancel_ability_by_tag(&plain));
    assert!(director.cancel_ability_by_tag(&flagged));
    assert!(!director.cancel_ability_by_tag(&flagged));

    assert!(!director.is_ability_on_cooldown(&plain));
    assert!(director.is_ability_on_cooldown(&flagged));
}

#[test]
fn set_cooldown_remaining_restarts_cooldown() {
    let mut director = AbilityDirector::new();
    let dash = tag("ability.dash");
    director.unlock_ability(AbilitySpec::new(dash.clone()).with_cooldown(4.0));
    director.trigger_cooldown(&dash, None);
    director.advance(1.0);

    assert!(director.set_cooldown_remaining(&dash, 0.5));
    assert_eq!(director.get_cooldown_remaining(&dash), (0.5, 0.5));

    director.advance(0.5);
    assert!(!director.is_ability_on_cooldown(&dash));

    director.trigger_cooldown(&dash, None);
    director.set_cooldown_remaining(&dash, 0.0);
    assert!(!director.is_ability_on_cooldown(&dash));
}

#[test]
fn block_is_reported_once_and_keeps_active_abilities() {
    let mut director = AbilityDirector::new();
    let dash = tag("ability.dash");
    director.unlock_ability(AbilitySpec::new(dash.clone()));
    director.activate_ability_by_tag(&dash);

    assert!(director.block_abilities(&tags(&["ability.dash"])));
    assert!(!director.block_abilities(&tags(&["ability.dash"])));
    assert!(director.has_ability_active(&dash));

    director.finish_ability_by_tag(&dash, None);
    assert_eq!(
        director.check_activation(&dash),
        Err(ActivationError::Blocked { tag: dash.clone() })
    );

    assert!(director.unblock_ability(&dash));
    assert!(director.activate_ability_by_tag(&dash));
}

#[test]
fn cost_is_checked_and_deducted() {
    let mana = tag("attr.mana");
    let bolt = tag("ability.bolt");
    let mut director = AbilityDirector::builder()
        .attribute(mana.clone(), Attribute::new(25.0))
        .ability(AbilitySpec::new(bolt.clone()).with_cost(AbilityCost::new(mana.clone(), 10.0)))
        .build();

    assert!(director.activate_ability_by_tag(&bolt));
    assert_eq!(director.attribute_value(&mana), Some(15.0));
    director.finish_ability_by_tag(&bolt, None);

    assert!(director.activate_ability_by_tag(&bolt));
    director.finish_ability_by_tag(&bolt, None);
    assert_eq!(director.attribute_value(&mana), Some(5.0));

    assert_eq!(
        director.check_activation(&bolt),
        Err(ActivationError::InsufficientCost {
            tag: bolt.clone(),
            attribute: mana.clone(),
            required: 10.0,
            available: 5.0,
        })
    );
    assert!(!director.activate_ability_by_tag(&bolt));
    assert_eq!(director.attribute_value(&mana), Some(5.0));
}

#[test]
fn cost_without_attribute_is_a_validation_error() {
    let mut director = AbilityDirector::new();
    let bolt = tag("ability.bolt");
    director.unlock_ability(
        AbilitySpec::new(bolt.clone()).with_cost(AbilityCost::new(tag("attr.mana"), 1.0)),
    );

    let error = director.check_activation(&bolt).unwrap_err();
    assert!(!error.severity().is_recoverable());
}

#[test]
fn removing_active_ability_cancels_it_and_its_cooldown() {
    let journal = Journal::new();
    let mut director = AbilityDirector::new();
    let channel = tag("ability.channel");
    director.unlock_ability(
        AbilitySpec::new(channel.clone())
            .with_cooldown(1.0)
            .with_flags(AbilityFlags::COOLDOWN_ON_CANCEL)
            .with_input_action(tag("input.secondary"))
            .with_hooks(journal.recorder("channel")),
    );
    director.activate_ability_by_tag(&channel);
    director.drain_events();

    assert!(director.remove_ability_by_tag(&channel));
    assert!(!director.remove_ability_by_tag(&channel));

    assert_eq!(
        journal.entries()[1..],
        ["channel:activated", "channel:cancelled", "channel:removed"]
    );
    assert!(director.active_abilities().is_empty());
    assert!(!director.has_ability_unlocked(&channel));
    assert!(director.scheduler().is_empty());

    director.advance(5.0);
    let events = director.drain_events();
    assert!(!events.contains(&DirectorEvent::CooldownFinished(channel.clone())));
    assert_eq!(events.last(), Some(&DirectorEvent::AbilityRemoved(channel)));
}

#[test]
fn removal_never_starts_a_cancel_cooldown() {
    let mut director = AbilityDirector::new();
    let dash = tag("ability.dash");
    director.unlock_ability(
        AbilitySpec::new(dash.clone())
            .with_cooldown(5.0)
            .with_flags(AbilityFlags::COOLDOWN_ON_CANCEL),
    );
    director.activate_ability_by_tag(&dash);
    director.drain_events();

    assert!(director.remove_ability_by_tag(&dash));
    director.advance(10.0);

    let events = director.drain_events();
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, DirectorEvent::CooldownStarted { .. }))
    );
    assert_eq!(
        events,
        vec![
            DirectorEvent::AbilityCancelled(dash.clone()),
            DirectorEvent::AbilityRemoved(dash),
        ]
    );
}

#[test]
fn hook_that_finishes_suppresses_later_hooks_and_activation_event() {
    let journal = Journal::new();
    let mut director = AbilityDirector::new();
    let blink = tag("ability.blink");
    director.unlock_ability(
        AbilitySpec::new(blink.clone())
            .with_cooldown(1.0)
            .with_hooks(FinishImmediately)
            .with_hooks(journal.recorder("late")),
    );
    director.drain_events();

    assert!(director.activate_ability_by_tag(&blink));

    assert_eq!(journal.count("late:activated"), 0);
    assert_eq!(journal.count("late:finished"), 1);
    assert!(!director.has_ability_active(&blink));
    assert!(director.is_ability_on_cooldown(&blink));

    let events = director.drain_events();
    assert!(!events.contains(&DirectorEvent::AbilityActivated(blink.clone())));
    assert!(events.contains(&DirectorEvent::AbilityFinished(blink)));
}

#[test]
fn input_phases_drive_auto_actions() {
    let journal = Journal::new();
    let mut director = AbilityDirector::new();
    let aim = tag("ability.aim");
    let trigger = tag("input.aim");
    director.unlock_ability(
        AbilitySpec::new(aim.clone())
            .with_input_action(trigger.clone())
            .with_flags(
                AbilityFlags::AUTO_ACTIVATE_ON_INPUT_STARTED
                    | AbilityFlags::AUTO_FINISH_ON_INPUT_COMPLETED,
            )
            .with_hooks(journal.recorder("aim")),
    );

    assert_eq!(director.input_started(&trigger), 1);
    assert!(director.has_ability_active(&aim));

    assert_eq!(director.input_ongoing(&trigger), 0);
    assert_eq!(journal.count("aim:input_ongoing"), 0);

    director.input_completed(&trigger);
    assert!(!director.has_ability_active(&aim));
    assert_eq!(
        journal.entries(),
        vec![
            "aim:added",
            "aim:activated",
            "aim:input_started",
            "aim:finished",
            "aim:input_completed",
        ]
    );

    assert_eq!(director.input_started(&tag("input.other")), 0);
}

#[test]
fn cancelled_input_cancels_and_ongoing_needs_flag() {
    let journal = Journal::new();
    let mut director = AbilityDirector::new();
    let charge = tag("ability.charge");
    let action = tag("input.charge");
    director.unlock_ability(
        AbilitySpec::new(charge.clone())
            .with_input_action(action.clone())
            .with_flags(
                AbilityFlags::AUTO_ACTIVATE_ON_INPUT_STARTED
                    | AbilityFlags::AUTO_CANCEL_ON_INPUT_CANCELLED
                    | AbilityFlags::ALLOW_INPUT_ONGOING,
            )
            .with_hooks(journal.recorder("charge")),
    );

    director.input_started(&action);
    assert_eq!(director.input_ongoing(&action), 1);
    director.input_cancelled(&action);

    assert_eq!(journal.count("charge:input_ongoing"), 1);
    assert_eq!(journal.count("charge:cancelled"), 1);
    assert!(!director.has_ability_active(&charge));
}

#[test]
fn level_scales_cost() {
    use ability_system::LevelScaling;

    let mana = tag("attr.mana");
    let bolt = tag("ability.bolt");
    let mut director = AbilityDirector::builder()
        .attribute(mana.clone(), Attribute::new(100.0))
        .ability(AbilitySpec::new(bolt.clone()).with_cost(
            AbilityCost::new(mana.clone(), 10.0)
                .with_scaling(LevelScaling::Linear { per_level: 5.0 }),
        ))
        .build();

    assert!(director.set_ability_level(&bolt, 3));
    director.activate_ability_by_tag(&bolt);

    assert_eq!(director.attribute_value(&mana), Some(80.0));
}

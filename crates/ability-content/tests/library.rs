use std::fs;

use ability_content::{ContentFactory, ContentLibrary};
use ability_system::{AbilityDirector, ActivationError, DirectorEvent};
use gameplay_tags::Tag;

fn tag(text: &str) -> Tag {
    Tag::new(text).unwrap()
}

fn embedded_director() -> AbilityDirector {
    let library = ContentLibrary::embedded().unwrap();
    library
        .populate(AbilityDirector::builder())
        .unwrap()
        .build()
}

#[test]
fn populate_grants_only_flagged_abilities() {
    let director = embedded_director();

    assert!(director.has_ability_unlocked(&tag("ability.move.dash")));
    assert!(director.has_ability_unlocked(&tag("ability.guard")));
    assert!(!director.has_ability_unlocked(&tag("ability.second_wind")));
    assert_eq!(director.attribute_value(&tag("attr.armor")), Some(5.0));
}

#[test]
fn sprint_input_applies_haste_until_released() {
    let mut director = embedded_director();
    let speed = tag("attr.speed");

    assert_eq!(director.input_started(&tag("input.sprint")), 1);
    assert!(director.has_ability_active(&tag("ability.move.sprint")));
    assert!(director.has_effect_active(&tag("effect.haste")));
    assert_eq!(director.attribute_value(&speed), Some(7.5));

    director.advance(1.0);
    director.input_completed(&tag("input.sprint"));

    assert!(!director.has_ability_active(&tag("ability.move.sprint")));
    assert!(!director.has_effect_active(&tag("effect.haste")));
    assert_eq!(director.attribute_value(&speed), Some(5.0));
    assert!(director.is_ability_on_cooldown(&tag("ability.move.sprint")));
}

#[test]
fn dash_spends_stamina_and_finishes_instantly() {
    let mut director = embedded_director();
    let dash = tag("ability.move.dash");

    director.input_started(&tag("input.dash"));

    assert!(!director.has_ability_active(&dash));
    assert_eq!(director.attribute_value(&tag("attr.stamina")), Some(40.0));
    assert_eq!(director.get_cooldown_remaining(&dash), (1.5, 1.5));

    let events = director.drain_events();
    assert!(events.contains(&DirectorEvent::AbilityFinished(dash.clone())));
    assert!(!events.contains(&DirectorEvent::AbilityActivated(dash)));
}

#[test]
fn stun_interrupts_movement_and_blocks_it_while_applied() {
    let library = ContentLibrary::embedded().unwrap();
    let mut director = embedded_director();
    let sprint = tag("ability.move.sprint");

    director.activate_ability_by_tag(&sprint);
    assert!(director.add_effect(library.effect_spec(&tag("effect.stun")).unwrap()));

    assert!(!director.has_ability_active(&sprint));
    assert!(!director.has_effect_active(&tag("effect.haste")));
    assert!(matches!(
        director.check_activation(&tag("ability.move.dash")),
        Err(ActivationError::Blocked { .. })
    ));

    director.advance(1.5);
    assert!(!director.has_ability_blocked(&tag("ability.move.dash")));
}

#[test]
fn heavy_attack_grants_power_until_finished() {
    let mut director = embedded_director();
    let heavy = tag("ability.attack.heavy");
    let power = tag("attr.power");

    assert!(director.activate_ability_by_tag(&heavy));
    assert_eq!(director.attribute_value(&power), Some(25.0));
    assert_eq!(director.attribute_value(&tag("attr.stamina")), Some(35.0));

    director.finish_ability_by_tag(&heavy, None);
    assert_eq!(director.attribute_value(&power), Some(10.0));
}

#[test]
fn second_wind_can_be_granted_later() {
    let library = ContentLibrary::embedded().unwrap();
    let mut director = embedded_director();
    let second_wind = tag("ability.second_wind");

    director.apply_attribute_operation(
        &tag("attr.health"),
        ability_system::AttributeOperation::Subtract,
        30.0,
    );
    director.activate_ability_by_tag(&tag("ability.move.dash"));
    assert!(director.unlock_ability(library.ability_spec(&second_wind).unwrap()));

    assert!(director.activate_ability_by_tag(&second_wind));
    assert_eq!(director.attribute_value(&tag("attr.stamina")), Some(50.0));
    assert!(director.has_effect_active(&tag("effect.regen")));

    director.advance(5.0);
    assert_eq!(director.attribute_value(&tag("attr.health")), Some(90.0));
    assert!(!director.has_effect_active(&tag("effect.regen")));
}

#[test]
fn factory_loads_catalogs_from_a_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("attributes.ron"),
        r#"(attributes: [(tag: "attr.focus", base: 20.0)])"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("effects.ron"),
        r#"(effects: [(tag: "effect.calm", payloads: [GrantModifier(attribute: "attr.focus", modifier: (value: 5.0))])])"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("abilities.ron"),
        r#"(abilities: [(tag: "ability.meditate", granted: true, payloads: [ApplyEffect(effect: "effect.calm", remove_on_end: true)])])"#,
    )
    .unwrap();

    let library = ContentFactory::new(dir.path()).load_library().unwrap();
    let mut director = library
        .populate(AbilityDirector::builder())
        .unwrap()
        .build();

    director.activate_ability_by_tag(&tag("ability.meditate"));
    assert_eq!(director.attribute_value(&tag("attr.focus")), Some(25.0));

    director.cancel_ability_by_tag(&tag("ability.meditate"));
    assert_eq!(director.attribute_value(&tag("attr.focus")), Some(20.0));
}

#[test]
fn factory_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let error = ContentFactory::new(dir.path()).load_abilities().unwrap_err();

    assert!(error.to_string().contains("abilities.ron"));
}

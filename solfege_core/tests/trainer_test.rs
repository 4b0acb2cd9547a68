use std::sync::Arc;

use crossbeam_channel::unbounded;
use solfege_core::gameplay::{GameEvent, RelativeQuestion, Sequence};
use solfege_core::input::events::AnswerInput;
use solfege_core::stats::storage::MemoryStorage;
use solfege_core::time::ManualClock;
use solfege_core::{ConfigError, StatsStore, Trainer, TrainerConfig};
use solfege_data::{Degree, Direction, Mode};

fn trainer(clock: &ManualClock) -> (Trainer, crossbeam_channel::Receiver<GameEvent>) {
    let stats = StatsStore::open(Box::new(MemoryStorage::new()), Arc::new(clock.clone())).into_shared();
    let (tx, rx) = unbounded();
    let trainer = Trainer::new(stats, Arc::new(clock.clone()), tx, &TrainerConfig::default())
        .unwrap()
        .with_seed(5);
    (trainer, rx)
}

#[test]
fn test_input_routes_to_active_mode() {
    let clock = ManualClock::new(0);
    let (mut trainer, _events) = trainer(&clock);
    let input = trainer.answer_input();

    trainer.select_mode(Mode::Ordinance);
    trainer
        .ordinance_mut()
        .present(Sequence::new(Degree::Fa, Direction::Ascending, 2));

    input.send(AnswerInput::from(Degree::Sol)).unwrap();
    assert_eq!(trainer.pump(), 1);

    let stats = trainer.stats().lock();
    assert_eq!(stats.summary(Mode::Ordinance).correct, 1);
    assert_eq!(stats.summary(Mode::Relative).total, 0);
}

#[test]
fn test_pump_runs_due_advance() {
    let clock = ManualClock::new(0);
    let (mut trainer, _events) = trainer(&clock);
    let input = trainer.answer_input();

    trainer.select_mode(Mode::Relative);
    trainer
        .relative_mut()
        .present(RelativeQuestion::from_interval(Degree::Do, 0, 2));

    input.send(Degree::Mi.into()).unwrap();
    trainer.pump();
    assert!(trainer.relative().current().unwrap().answered);

    clock.advance(2000);
    trainer.pump();
    assert!(!trainer.relative().current().unwrap().answered);
}

#[test]
fn test_stray_double_click_is_ignored() {
    let clock = ManualClock::new(0);
    let (mut trainer, _events) = trainer(&clock);
    let input = trainer.answer_input();

    trainer.select_mode(Mode::Relative);
    input.send(Degree::Do.into()).unwrap();
    input.send(Degree::Re.into()).unwrap();
    assert_eq!(trainer.pump(), 2);

    assert_eq!(trainer.stats().lock().log().len(), 1);
}

#[test]
fn test_input_without_mode_is_dropped() {
    let clock = ManualClock::new(0);
    let (mut trainer, events) = trainer(&clock);
    let input = trainer.answer_input();

    input.send(Degree::Do.into()).unwrap();
    assert_eq!(trainer.pump(), 1);
    assert!(trainer.stats().lock().log().is_empty());
    assert!(events.try_recv().is_err());
}

#[test]
fn test_leaving_mode_cancels_advance() {
    let clock = ManualClock::new(0);
    let (mut trainer, _events) = trainer(&clock);
    let input = trainer.answer_input();

    trainer.select_mode(Mode::Relative);
    input.send(Degree::Do.into()).unwrap();
    trainer.pump();
    let answered = *trainer.relative().current().unwrap();

    trainer.back_to_menu();
    assert_eq!(trainer.active_mode(), None);

    clock.advance(10_000);
    trainer.pump();
    assert_eq!(*trainer.relative().current().unwrap(), answered);
}

#[test]
fn test_switching_mode_starts_fresh_question() {
    let clock = ManualClock::new(0);
    let (mut trainer, events) = trainer(&clock);

    trainer.select_mode(Mode::Relative);
    trainer.select_mode(Mode::Ordinance);
    assert_eq!(trainer.active_mode(), Some(Mode::Ordinance));
    assert!(trainer.ordinance().current().is_some());

    let instructions: Vec<&'static str> = events
        .try_iter()
        .filter_map(|e| match e {
            GameEvent::Instruction { key, .. } => Some(key),
            _ => None,
        })
        .collect();
    assert_eq!(instructions.len(), 2);
    assert_eq!(instructions[0], "instruction_relative");
    assert!(instructions[1].starts_with("instruction_ordinance_"));
}

#[test]
fn test_invalid_config_fails_before_any_question() {
    let clock = ManualClock::new(0);
    let stats = StatsStore::open(Box::new(MemoryStorage::new()), Arc::new(clock.clone())).into_shared();
    let (tx, rx) = unbounded();
    let config = TrainerConfig {
        staff_min: 5,
        staff_max: 1,
        ..TrainerConfig::default()
    };

    let err = Trainer::new(stats, Arc::new(clock), tx, &config).err().unwrap();
    assert_eq!(err.to_string(), "invalid config: staff_min (5) is above staff_max (1)");
    assert!(rx.try_iter().next().is_none());
}

#[test]
fn test_pushed_answers_are_pumped() {
    let clock = ManualClock::new(0);
    let (mut trainer, _events) = trainer(&clock);

    trainer.select_mode(Mode::Ordinance);
    trainer
        .ordinance_mut()
        .present(Sequence::new(Degree::Fa, Direction::Ascending, 2));

    trainer.push_answer(Degree::Sol);
    assert_eq!(trainer.pump(), 1);
    assert!(trainer.ordinance().current().unwrap().is_complete());
}

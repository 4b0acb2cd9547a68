use std::{io::BufRead, sync::Arc, thread, time::Duration};

use anyhow::Context;
use crossbeam_channel::{unbounded, Receiver};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use solfege_core::{
    gameplay::{GameEvent, Outcome},
    time::SystemClock,
    SharedStats, Trainer, TrainerConfig,
};
use solfege_data::{Degree, Mode};
use tracing::debug;

use crate::render;

pub struct PlayOptions {
    pub mode: Mode,
    pub rounds: Option<u32>,
    pub shuffle: bool,
    pub seed: Option<u64>,
}

/// Terminal front end for one quiz mode. Each line of `input` is one
/// answer; `q` or end of input stops the session.
pub fn run_session(
    stats: SharedStats,
    config: &TrainerConfig,
    options: &PlayOptions,
    input: impl BufRead,
) -> anyhow::Result<()> {
    let (events_tx, events_rx) = unbounded();
    let mut trainer = Trainer::new(stats.clone(), Arc::new(SystemClock), events_tx, config)
        .context("failed to start session")?;
    let mut option_rng = match options.seed {
        Some(seed) => {
            trainer = trainer.with_seed(seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let advance_delay = Duration::from_millis(match options.mode {
        Mode::Relative => config.relative_advance_ms,
        Mode::Ordinance => config.ordinance_advance_ms,
    });

    let mut finished = 0;
    debug!(mode = %options.mode, rounds = ?options.rounds, "session started");
    trainer.select_mode(options.mode);
    print_question(&events_rx, &mut option_rng, options.shuffle);

    for line in input.lines() {
        let line = line.context("failed to read answer")?;
        let answer = line.trim();
        if answer.is_empty() {
            continue;
        }
        if answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit") {
            break;
        }

        let degree: Degree = match answer.parse() {
            Ok(degree) => degree,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        trainer.push_answer(degree);
        trainer.pump();

        if !print_feedback(&events_rx, options.mode) {
            continue;
        }
        finished += 1;
        if options.rounds.is_some_and(|rounds| finished >= rounds) {
            break;
        }

        thread::sleep(advance_delay);
        trainer.pump();
        print_question(&events_rx, &mut option_rng, options.shuffle);
    }

    trainer.back_to_menu();
    debug!(finished, "session ended");
    print!("{}", render::stats_report(&stats.lock(), options.mode, config.history_days));
    Ok(())
}

fn print_question(events: &Receiver<GameEvent>, rng: &mut StdRng, shuffle: bool) {
    println!();
    for event in events.try_iter() {
        print!("{}", render::event_text(&event));
    }

    let mut options = Degree::ALL;
    if shuffle {
        options.shuffle(rng);
    }
    println!("{}", render::options_line(&options));
}

/// Prints pending events and reports whether the current question is over.
fn print_feedback(events: &Receiver<GameEvent>, mode: Mode) -> bool {
    let mut finished = false;
    for event in events.try_iter() {
        print!("{}", render::event_text(&event));
        if let GameEvent::AnswerFeedback { outcome, .. } = &event {
            finished |= mode == Mode::Relative || *outcome == Outcome::Correct;
        }
    }
    finished
}

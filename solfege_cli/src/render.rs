use std::fmt::Write;

use chrono::{DateTime, Local};

use solfege_core::{
    chart::{ChartLayout, Projection},
    gameplay::{GameEvent, Outcome, QuestionView, StaffNote},
    staff, StatsStore,
};
use solfege_data::{AttemptRecord, Degree, Direction, Mode};

const STAFF_WIDTH: usize = 25;
const NOTE_COLUMNS: [usize; 2] = [8, 16];

pub fn instruction_text(key: &str, params: &[(&str, String)]) -> String {
    let template = match key {
        "instruction_relative" => "Name the second note. The first one is {ref}.",
        "instruction_ordinance_asc" => "Complete the ascending sequence.",
        "instruction_ordinance_desc" => "Complete the descending sequence.",
        other => other,
    };
    params
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

fn seconds(ms: u64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}

/// Draws notes on a five-line staff, top row first.
pub fn staff_ascii(notes: &[StaffNote]) -> String {
    let highest = notes
        .iter()
        .map(|n| n.position)
        .chain([staff::TOP_LINE + 2])
        .max()
        .unwrap_or(staff::TOP_LINE);
    let lowest = notes
        .iter()
        .map(|n| n.position)
        .chain([staff::BOTTOM_LINE - 2])
        .min()
        .unwrap_or(staff::BOTTOM_LINE);

    let mut out = String::new();
    for position in (lowest..=highest).rev() {
        let fill = if staff::is_on_staff_line(position) { '-' } else { ' ' };
        let mut row: Vec<char> = vec![fill; STAFF_WIDTH];

        for (note, &col) in notes.iter().zip(NOTE_COLUMNS.iter()) {
            if staff::ledger_lines(note.position).contains(&position) {
                for c in row.iter_mut().skip(col - 2).take(5) {
                    *c = '-';
                }
            }
            if note.position == position {
                row[col] = 'O';
            }
        }

        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let mut labels: Vec<char> = vec![' '; STAFF_WIDTH];
    for (note, &col) in notes.iter().zip(NOTE_COLUMNS.iter()) {
        let label = note.label.map_or("?".to_string(), |d| d.to_string());
        for (i, ch) in label.chars().enumerate() {
            if let Some(slot) = labels.get_mut(col + i) {
                *slot = ch;
            }
        }
    }
    let labels: String = labels.into_iter().collect();
    out.push_str(labels.trim_end());
    out.push('\n');
    out
}

/// Slot boxes for a sequence; descending runs read right to left.
pub fn sequence_slots(revealed: &[Degree], total_len: usize, direction: Direction) -> String {
    let mut slots: Vec<String> = (0..total_len)
        .map(|i| match revealed.get(i) {
            Some(degree) => format!("[{degree:^3}]"),
            None if i == revealed.len() => "[ ? ]".to_string(),
            None => "[   ]".to_string(),
        })
        .collect();
    if direction == Direction::Descending {
        slots.reverse();
    }
    slots.join(" ")
}

pub fn options_line(options: &[Degree]) -> String {
    let names: Vec<String> = options.iter().map(|d| d.to_string()).collect();
    format!("Options: {}", names.join("  "))
}

pub fn event_text(event: &GameEvent) -> String {
    match event {
        GameEvent::Instruction { key, params } => format!("{}\n", instruction_text(key, params)),
        GameEvent::QuestionReady(QuestionView::Relative { reference, target }) => {
            staff_ascii(&[*reference, *target])
        }
        GameEvent::QuestionReady(QuestionView::Ordinance {
            total_len,
            revealed,
            direction,
        })
        | GameEvent::SequenceProgress {
            revealed,
            total_len,
            direction,
        } => format!("{}\n", sequence_slots(revealed, *total_len, *direction)),
        GameEvent::AnswerFeedback {
            mode,
            outcome,
            selected,
            correct,
        } => match (outcome, mode) {
            (Outcome::Correct, Mode::Ordinance) => "Sequence complete!\n".to_string(),
            (Outcome::Correct, Mode::Relative) => format!("Correct: {selected}\n"),
            (Outcome::Incorrect, _) => match correct {
                Some(answer) => format!("Wrong: {selected}. The answer was {answer}.\n"),
                None => format!("Not {selected}, try again.\n"),
            },
        },
    }
}

pub fn stats_report(stats: &StatsStore, mode: Mode, days: usize) -> String {
    let summary = stats.summary(mode);
    let mut out = String::new();
    let _ = writeln!(out, "{mode}");
    let _ = writeln!(out, "  Total:        {}", summary.total);
    let _ = writeln!(out, "  Accuracy:     {}%", summary.percentage);
    let _ = writeln!(out, "  Median time:  {}", seconds(summary.median_elapsed_ms));
    let _ = writeln!(out, "  Fastest time: {}", seconds(summary.fastest_elapsed_ms));

    let buckets = stats.daily_buckets(mode, days);
    if buckets.is_empty() {
        let _ = writeln!(out, "  No data");
        return out;
    }
    let _ = writeln!(out, "  Date        Total  Acc   Median");
    for bucket in buckets {
        let _ = writeln!(
            out,
            "  {}  {:>5}  {:>3}%  {:>6}",
            bucket.date,
            bucket.total,
            bucket.accuracy,
            seconds(bucket.median_elapsed_ms)
        );
    }
    out
}

/// Attempts oldest first, in local time.
pub fn recent_report(attempts: &[AttemptRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Recent attempts:");
    if attempts.is_empty() {
        let _ = writeln!(out, "    none");
        return out;
    }
    for attempt in attempts {
        let when = DateTime::from_timestamp_millis(attempt.timestamp)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "?".to_string());
        let verdict = if attempt.correct { "correct" } else { "wrong" };
        let time = if attempt.is_timed_success() {
            seconds(attempt.elapsed_ms)
        } else {
            "-".to_string()
        };
        let _ = writeln!(out, "    {when}  {verdict:<7}  {time:>6}");
    }
    out
}

pub fn chart_report(projection: &Projection) -> String {
    let plot = match projection {
        Projection::NoData => return "No data\n".to_string(),
        Projection::Plot(plot) => plot,
    };

    let mut out = String::new();
    let ticks: Vec<&str> = plot.y_ticks.iter().map(|t| t.label.as_str()).collect();
    let _ = writeln!(out, "Scale: {}", ticks.join(" / "));
    for point in &plot.points {
        let bar = "#".repeat((point.y * 40.0).round() as usize);
        let _ = writeln!(out, "{}  {:>6}  {}", point.date, point.label, bar);
    }
    out
}

pub fn chart_svg(projection: &Projection, layout: &ChartLayout) -> String {
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\">\n",
        layout.width, layout.height
    );
    match projection {
        Projection::NoData => {
            let _ = writeln!(
                out,
                "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\">No data</text>",
                layout.width / 2.0,
                layout.height / 2.0
            );
        }
        Projection::Plot(plot) => {
            for tick in &plot.y_ticks {
                let (_, y) = layout.to_pixels(0.0, tick.y);
                let _ = writeln!(
                    out,
                    "  <line x1=\"{}\" y1=\"{y:.1}\" x2=\"{}\" y2=\"{y:.1}\" class=\"chart-grid\" />",
                    layout.padding.left,
                    layout.width - layout.padding.right
                );
                let _ = writeln!(
                    out,
                    "  <text x=\"{}\" y=\"{:.1}\" text-anchor=\"end\" class=\"chart-label\">{}</text>",
                    layout.padding.left - 5.0,
                    y + 3.0,
                    tick.label
                );
            }
            let _ = writeln!(
                out,
                "  <path d=\"{}\" class=\"chart-line\" fill=\"none\" />",
                plot.svg_path(layout)
            );
            for ((x, y), point) in plot.polyline(layout).into_iter().zip(&plot.points) {
                let _ = writeln!(
                    out,
                    "  <circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"4\" class=\"chart-point\" data-value=\"{}\" />",
                    point.label
                );
            }
        }
    }
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_substitutes_params() {
        let text = instruction_text("instruction_relative", &[("ref", "Sol".to_string())]);
        assert_eq!(text, "Name the second note. The first one is Sol.");
        assert_eq!(instruction_text("unknown_key", &[]), "unknown_key");
    }

    #[test]
    fn staff_draws_ledger_for_low_note() {
        let art = staff_ascii(&[
            StaffNote {
                position: 0,
                label: Some(Degree::Do),
            },
            StaffNote {
                position: -2,
                label: None,
            },
        ]);
        let rows: Vec<&str> = art.lines().collect();
        // Rows run from position 10 down to -2, plus the label row.
        assert_eq!(rows.len(), 14);
        assert_eq!(rows[10].chars().nth(8), Some('O'));
        assert_eq!(rows[12], "              --O--");
        assert_eq!(rows[13], "        Do      ?");
    }

    #[test]
    fn recent_report_marks_untimed_failures() {
        let attempts = [
            AttemptRecord {
                timestamp: 1_704_067_200_000,
                mode: Mode::Ordinance,
                correct: false,
                elapsed_ms: 0,
            },
            AttemptRecord {
                timestamp: 1_704_067_260_000,
                mode: Mode::Ordinance,
                correct: true,
                elapsed_ms: 1500,
            },
        ];
        let report = recent_report(&attempts);
        let rows: Vec<&str> = report.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].ends_with("wrong         -"));
        assert!(rows[2].ends_with("correct    1.5s"));
        assert_eq!(recent_report(&[]), "  Recent attempts:\n    none\n");
    }

    #[test]
    fn descending_slots_read_right_to_left() {
        let slots = sequence_slots(&[Degree::Mi], 3, Direction::Descending);
        assert_eq!(slots, "[   ] [ ? ] [Mi ]");
        let slots = sequence_slots(&[Degree::Mi, Degree::Fa], 3, Direction::Ascending);
        assert_eq!(slots, "[Mi ] [Fa ] [ ? ]");
    }
}

use std::io::{Result, Write};

use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};

use shared_resources::{Call, HallCall, Snapshot};

use crate::assigner::Outcome;

/// Writes the hall calls and the chosen assignment as two tables.
pub fn print_status<W: Write>(out: &mut W, snapshot: &Snapshot, outcome: &Outcome) -> Result<()> {
    writeln!(out, "+--------------------------------------------------+")?;
    writeln!(out, "| HALL CALLS                                       |")?;
    writeln!(out, "+------------+------------------+------------------+")?;
    writeln!(out, "| {0:<10} | {1:<16} | {2:<16} |", "FLOOR", "HALL UP", "HALL DOWN")?;
    for floor in (0..snapshot.num_floors()).rev() {
        writeln!(out, "+------------+------------------+------------------+")?;
        queue!(out, Print(format!("| {0:<10} | ", floor)))?;
        for call in Call::iter_hall() {
            let hall_call = HallCall::new(floor, call);
            let cell = match outcome.assignment.elevator_for(hall_call) {
                Some(id) => format!("{0:<16}", id.as_str()).green(),
                None if snapshot.hall_calls().contains(&hall_call) => format!("{0:<16}", "UNASSIGNED").red(),
                None => format!("{0:<16}", "").reset(),
            };
            queue!(out, PrintStyledContent(cell), Print(" | "))?;
        }
        queue!(out, Print("\n"))?;
    }
    writeln!(out, "+------------+------------------+------------------+\n")?;

    writeln!(out, "+----------------------------------------------------------------+")?;
    writeln!(out, "| ELEVATORS                                                      |")?;
    writeln!(out, "+-----------------+------------+------------+------------+-------+")?;
    writeln!(
        out,
        "| {0:<15} | {1:<10} | {2:<10} | {3:<10} | {4:<5} |",
        "ID", "STATE", "FLOOR", "DIRECTION", "CALLS"
    )?;
    writeln!(out, "+-----------------+------------+------------+------------+-------+")?;
    for (id, state) in snapshot.elevators() {
        writeln!(
            out,
            "| {0:<15} | {1:<10} | {2:<10} | {3:<10} | {4:<5} |",
            id.as_str(),
            state.behaviour().as_str(),
            state.floor(),
            state.direction().as_str(),
            outcome.plan.calls_for(id).count()
        )?;
        writeln!(out, "+-----------------+------------+------------+------------+-------+")?;
    }

    let assignment = &outcome.assignment;
    writeln!(
        out,
        "{:?} search, worst {}, total {}, {} combinations{}",
        assignment.strategy,
        assignment.objective.worst,
        assignment.objective.total,
        assignment.explored,
        if assignment.timed_out { " (budget ran out)" } else { "" }
    )?;
    out.flush()
}

//! Line-driven session where the page clock follows the wall clock.

use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    time::{sleep, sleep_until, Instant},
};
use widget_core::{
    session::{apply_step, StepReport},
    Document, ReservationPage,
};

use crate::commands::{self, Command, HELP};

fn sync_clock<D: Document>(page: &mut ReservationPage<D>, started: Instant) -> Result<usize> {
    let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let target = elapsed.max(page.now_ms());
    Ok(page.advance_time_to(target)?)
}

pub async fn run<D, R, W>(mut page: ReservationPage<D>, input: R, out: &mut W) -> Result<()>
where
    D: Document,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let started = Instant::now();
    let mut lines = input.lines();
    writeln!(out, "{}", commands::describe(&page.snapshot()))?;

    loop {
        let deadline = page
            .timers()
            .next_due_at()
            .map(|due| started + Duration::from_millis(due));

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                sync_clock(&mut page, started)?;

                let command = match commands::parse_command(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(err) => {
                        writeln!(out, "error: {err:#}")?;
                        continue;
                    }
                };

                match command {
                    Command::Quit => break,
                    Command::Help => writeln!(out, "{HELP}")?,
                    Command::Wait(ms) => {
                        sleep(Duration::from_millis(ms)).await;
                        sync_clock(&mut page, started)?;
                        writeln!(out, "{}", commands::describe(&page.snapshot()))?;
                    }
                    Command::Step(step) => {
                        match apply_step(&mut page, &step) {
                            Ok(StepReport::Event(outcome)) => {
                                tracing::debug!(?outcome, "step applied");
                            }
                            Ok(_) => {}
                            Err(err) => writeln!(out, "error: {err}")?,
                        }
                        writeln!(out, "{}", commands::describe(&page.snapshot()))?;
                    }
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                let ran = sync_clock(&mut page, started)?;
                if ran > 0 {
                    writeln!(out, "{}", commands::describe(&page.snapshot()))?;
                }
            }
        }
        out.flush()?;
    }

    Ok(())
}

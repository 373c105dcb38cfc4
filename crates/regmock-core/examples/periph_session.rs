//! Verified driver session against the toy control/status/data peripheral.
//!
//! Declares the full expected access sequence for a start / send-one-byte /
//! stop session, runs the driver against the mock block, and reports the
//! first violation, if any, the way an embedding test harness would.

use regmock_core::{BlockMapper, RegCell, TestContext, Violation};

use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

const PERIPH_BASE: u32 = 0x2000_0800;
const CR_START: u32 = 0x01;
const CR_STOP: u32 = 0x00;

struct Periph {
    cr: RegCell,
    dr: RegCell,
    isr: RegCell,
}

impl Periph {
    fn map_at(base: u32) -> Self {
        let mut map = BlockMapper::at(base);
        Self {
            cr: map.cell(),
            dr: map.cell(),
            isr: map.cell(),
        }
    }
}

// Code under test: a deliberately plain polling driver.

fn periph_start(periph: &Periph, ctx: &mut TestContext) -> Result<(), Violation> {
    periph.cr.write(ctx, CR_START)?;
    while periph.isr.read(ctx)? == 0 {}
    Ok(())
}

fn periph_send(periph: &Periph, ctx: &mut TestContext, byte: u32) -> Result<(), Violation> {
    periph.dr.write(ctx, byte)?;
    while periph.isr.read(ctx)? == 0 {}
    Ok(())
}

fn periph_stop(periph: &Periph, ctx: &mut TestContext) -> Result<(), Violation> {
    periph.cr.write(ctx, CR_STOP)
}

fn run_session() -> Result<(), Violation> {
    let periph = Periph::map_at(PERIPH_BASE);
    let mut ctx = TestContext::new();

    ctx.expect_write(&periph.cr, CR_START);
    ctx.expect_read(&periph.isr, 0x00);
    ctx.expect_read(&periph.isr, 0x00);
    ctx.expect_read(&periph.isr, 0x01);
    periph_start(&periph, &mut ctx)?;
    ctx.expect_rest()?;

    ctx.expect_write(&periph.dr, 0x20);
    ctx.expect_read(&periph.isr, 0x00);
    ctx.expect_read(&periph.isr, 0x01);
    periph_send(&periph, &mut ctx, 0x20)?;
    ctx.expect_rest()?;

    ctx.expect_write(&periph.cr, CR_STOP);
    periph_stop(&periph, &mut ctx)?;
    ctx.expect_rest()?;

    for (addr, value) in ctx.write_log() {
        println!("committed write: {value:#010x} -> {addr}");
    }
    Ok(())
}

fn main() {
    match run_session() {
        Ok(()) => println!("session verified: all expected register operations occurred"),
        Err(violation) => {
            eprintln!("register protocol violation: {violation}");
            std::process::exit(1);
        }
    }
}

#![no_std]
#![no_main]

use panic_halt as _;

use defmt_rtt as _;
use rtic::app;

use pico_alarm_clock::clock::{AlarmSetpoint, WallClock};
use pico_alarm_clock::debounce::Debouncer;
use pico_alarm_clock::display::{self, Flash};
use pico_alarm_clock::shift_reg::ShiftRegDisplay;
use pico_alarm_clock::wait::Countdown;

/// Time base tick, exactly one second.
const SECOND_US: u32 = 1_000_000;
/// Housekeeping tick: debounce sampling, flash ageing, display refresh.
const HOUSEKEEP_US: u32 = 1_000;
/// How long the alarm-set feedback frame stays on screen.
const ALARM_FLASH_MS: u16 = 1_000;
/// Per-digit strobe width, in core cycles (~200 us at 125 MHz). The four
/// strobes fill most of a refresh frame so every digit gets an equal, bright
/// slot; `render4` blanks the selects for the remainder.
const SETTLE_CYCLES: u32 = 25_000;

fn settle() {
    cortex_m::asm::delay(SETTLE_CYCLES);
}

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use super::*;
    use cortex_m::asm;
    use embedded_hal::digital::v2::{InputPin, OutputPin};
    use rp_pico::hal::{
        clocks::init_clocks_and_plls,
        fugit::ExtU32,
        gpio::{
            bank0::{Gpio10, Gpio11, Gpio12, Gpio2, Gpio3, Gpio4, Gpio5, Gpio6, Gpio7},
            FunctionSio, Interrupt, Pin, PullDown, PullUp, SioInput, SioOutput,
        },
        sio::Sio,
        timer::{Alarm, Alarm0, Alarm1, Timer},
        watchdog::Watchdog,
    };

    type Button<P> = Pin<P, FunctionSio<SioInput>, PullUp>;
    type OutPin<P> = Pin<P, FunctionSio<SioOutput>, PullDown>;
    type Display = ShiftRegDisplay<OutPin<Gpio10>, OutPin<Gpio11>, OutPin<Gpio12>>;

    #[shared]
    struct Shared {
        clock: WallClock,
        alarm: AlarmSetpoint,
        flash: Flash,
        flash_timer: Countdown,
        // Edge-interrupt pins, shared so the housekeeping task can re-arm
        // them once the feedback flash (and with it the bounce window) is
        // over.
        alarm_hour_button: Button<Gpio2>,
        alarm_minute_button: Button<Gpio3>,
    }

    #[local]
    struct Local {
        tick_alarm: Alarm0,
        housekeep_alarm: Alarm1,
        display: Display,
        display_enable: OutPin<Gpio7>,
        hour_button: Button<Gpio4>,
        minute_button: Button<Gpio5>,
        hour_debounce: Debouncer,
        minute_debounce: Debouncer,
        alarm_output: OutPin<Gpio6>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut tick_alarm = timer.alarm_0().unwrap();
        tick_alarm.schedule(SECOND_US.micros()).unwrap();
        tick_alarm.enable_interrupt();

        let mut housekeep_alarm = timer.alarm_1().unwrap();
        housekeep_alarm.schedule(HOUSEKEEP_US.micros()).unwrap();
        housekeep_alarm.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        // Display driver enable line, held high for the lifetime of the
        // firmware.
        let mut display_enable = pins.gpio7.into_push_pull_output();
        display_enable.set_high().unwrap();

        let mut display = ShiftRegDisplay::new(
            pins.gpio10.into_push_pull_output(),
            pins.gpio11.into_push_pull_output(),
            pins.gpio12.into_push_pull_output(),
            settle,
        );
        display.init().unwrap();

        // Alarm-set buttons fire on the falling edge (active low, pulled up).
        let alarm_hour_button = pins.gpio2.into_pull_up_input();
        alarm_hour_button.set_interrupt_enabled(Interrupt::EdgeLow, true);
        let alarm_minute_button = pins.gpio3.into_pull_up_input();
        alarm_minute_button.set_interrupt_enabled(Interrupt::EdgeLow, true);

        // Clock-set buttons are polled and debounced on the housekeeping tick.
        let hour_button = pins.gpio4.into_pull_up_input();
        let minute_button = pins.gpio5.into_pull_up_input();

        let alarm_output = pins.gpio6.into_push_pull_output();

        defmt::info!("alarm clock running");

        (
            Shared {
                clock: WallClock::new(),
                alarm: AlarmSetpoint::new(),
                flash: Flash::None,
                flash_timer: Countdown::idle(),
                alarm_hour_button,
                alarm_minute_button,
            },
            Local {
                tick_alarm,
                housekeep_alarm,
                display,
                display_enable,
                hour_button,
                minute_button,
                hour_debounce: Debouncer::new(),
                minute_debounce: Debouncer::new(),
                alarm_output,
            },
            init::Monotonics(),
        )
    }

    // Time base: advances the wall clock once per second. Kept branch-only;
    // all rendering happens on the housekeeping tick.
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [clock], local = [tick_alarm])]
    fn second_tick(mut ctx: second_tick::Context) {
        ctx.local.tick_alarm.clear_interrupt();
        ctx.local.tick_alarm.schedule(SECOND_US.micros()).unwrap();

        ctx.shared.clock.lock(|clock| clock.tick());
    }

    // Alarm-set buttons. The handler only bumps the setpoint and records the
    // feedback flash; the render burst itself runs outside interrupt context
    // of this handler, on the housekeeping tick. A handled press masks its
    // pin's edge interrupt so contact bounce cannot deliver extra bumps; the
    // housekeeping task re-arms it when the flash times out.
    #[task(
        binds = IO_IRQ_BANK0,
        priority = 1,
        shared = [alarm, flash, flash_timer, alarm_hour_button, alarm_minute_button],
    )]
    fn alarm_buttons(mut ctx: alarm_buttons::Context) {
        let hour_edge = ctx.shared.alarm_hour_button.lock(|button| {
            let edge = button.interrupt_status(Interrupt::EdgeLow);
            if edge {
                button.set_interrupt_enabled(Interrupt::EdgeLow, false);
                button.clear_interrupt(Interrupt::EdgeLow);
            }
            edge
        });
        let minute_edge = ctx.shared.alarm_minute_button.lock(|button| {
            let edge = button.interrupt_status(Interrupt::EdgeLow);
            if edge {
                button.set_interrupt_enabled(Interrupt::EdgeLow, false);
                button.clear_interrupt(Interrupt::EdgeLow);
            }
            edge
        });

        if hour_edge {
            let setpoint = ctx.shared.alarm.lock(|alarm| {
                alarm.bump_hour();
                *alarm
            });
            ctx.shared.flash.lock(|flash| *flash = Flash::AlarmHour);
            defmt::debug!("alarm setpoint {}", setpoint);
        }

        if minute_edge {
            let setpoint = ctx.shared.alarm.lock(|alarm| {
                alarm.bump_minute();
                *alarm
            });
            ctx.shared.flash.lock(|flash| *flash = Flash::AlarmMinute);
            defmt::debug!("alarm setpoint {}", setpoint);
        }

        if hour_edge || minute_edge {
            ctx.shared
                .flash_timer
                .lock(|timer| timer.start(ALARM_FLASH_MS));
        }
    }

    // Housekeeping tick, once per millisecond: debounce the manual-set
    // buttons, age the feedback flash, refresh the multiplexed display and
    // track the alarm comparison.
    #[task(
        binds = TIMER_IRQ_1,
        priority = 1,
        shared = [clock, alarm, flash, flash_timer, alarm_hour_button, alarm_minute_button],
        local = [
            housekeep_alarm,
            display,
            hour_button,
            minute_button,
            hour_debounce,
            minute_debounce,
            alarm_output,
            alarm_active: bool = false,
        ],
    )]
    fn housekeep(mut ctx: housekeep::Context) {
        ctx.local.housekeep_alarm.clear_interrupt();
        ctx.local
            .housekeep_alarm
            .schedule(HOUSEKEEP_US.micros())
            .unwrap();

        // Manual adjustment, repeating while held. The bump happens under
        // the clock lock, so the time base tick cannot interleave with the
        // read-modify-write.
        let hour_pressed = ctx.local.hour_button.is_low().unwrap();
        if ctx.local.hour_debounce.sample(hour_pressed) {
            ctx.shared.clock.lock(|clock| clock.bump_hour());
        }
        let minute_pressed = ctx.local.minute_button.is_low().unwrap();
        if ctx.local.minute_debounce.sample(minute_pressed) {
            ctx.shared.clock.lock(|clock| clock.bump_minute());
        }

        if ctx.shared.flash_timer.lock(|timer| timer.tick()) {
            ctx.shared.flash.lock(|flash| *flash = Flash::None);
            // The press's bounce has long settled; drop any edges that
            // piled up while masked and re-arm the alarm-set interrupts.
            ctx.shared.alarm_hour_button.lock(|button| {
                button.clear_interrupt(Interrupt::EdgeLow);
                button.set_interrupt_enabled(Interrupt::EdgeLow, true);
            });
            ctx.shared.alarm_minute_button.lock(|button| {
                button.clear_interrupt(Interrupt::EdgeLow);
                button.set_interrupt_enabled(Interrupt::EdgeLow, true);
            });
        }

        let flash = ctx.shared.flash.lock(|flash| *flash);
        let alarm = ctx.shared.alarm.lock(|alarm| *alarm);
        let (frame, matching) = ctx.shared.clock.lock(|clock| {
            let frame = match flash {
                Flash::AlarmHour => display::alarm_hour_frame(&alarm),
                Flash::AlarmMinute => display::alarm_minute_frame(&alarm),
                Flash::None => display::time_frame(clock),
            };
            (frame, alarm.matches(clock))
        });

        ctx.local.display.render4(&frame).unwrap();

        // Live comparison, no latch: the output clears itself once the
        // minute passes.
        if matching {
            ctx.local.alarm_output.set_high().unwrap();
        } else {
            ctx.local.alarm_output.set_low().unwrap();
        }
        if matching != *ctx.local.alarm_active {
            *ctx.local.alarm_active = matching;
            if matching {
                defmt::info!("alarm output asserted");
            } else {
                defmt::info!("alarm output cleared");
            }
        }
    }

    // Low-power wait: sleep until the next interrupt and re-enter sleep on
    // spurious wakeups. The display enable pin is parked here so it stays
    // driven for the lifetime of the firmware.
    #[idle(local = [display_enable])]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            asm::wfi();
        }
    }
}

//! Bobin - Coil Winder Panel Firmware
//!
//! Main firmware binary for the RP2040-based operator panel. The panel
//! reads the keypad, foot pedal, turn sensor and speed potentiometer,
//! shows the job on a 20x4 LCD, and drives the motor controller over a
//! line protocol on UART0.
//!
//! Everything runs in a single cooperative loop: the core `Winder` is fed
//! input each pass and its effects are carried out here.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use bobin_core::homing::Homing;
use bobin_core::keys::KEYMAP;
use bobin_core::tone::{TonePattern, ToneSequencer};
use bobin_core::{Effect, Winder};
use bobin_display::hd44780::{Hd44780, DEFAULT_ADDRESS};
use bobin_display::{render, templates, type_out, DisplayBackend, Screen};
use bobin_hal::KeypadSource;
use bobin_hal_rp2040::adc::EIGHT_BIT_SHIFT;
use bobin_hal_rp2040::{
    Clock, EmbassyClock, InputPin, LinkRx, LinkTx, MatrixKeypad, OutputPin, PinInput, PinOutput,
    PotInput, UartRx, UartTx,
};
use bobin_protocol::ControllerCommand;

mod config {
    use bobin_core::config::{HomingConfig, LinkConfig, SpeedConfig, TimingConfig, WinderConfig};

    // Generated by build.rs from winder.toml
    include!(concat!(env!("OUT_DIR"), "/winder_config.rs"));
}

use config::WINDER_CONFIG;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Bobin firmware starting...");

    let p = embassy_rp::init(Default::default());
    let clock = EmbassyClock;

    // Motor controller link: UART0 on GPIO0 (TX) / GPIO1 (RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = WINDER_CONFIG.link.baud;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let mut tx = LinkTx::new(tx);
    let mut rx = LinkRx::new(rx);

    while !tx.is_ready() {
        Timer::after_millis(1).await;
    }
    info!("Link up at {} baud", WINDER_CONFIG.link.baud);

    // LCD: PCF8574 backpack on I2C0, GPIO4 (SDA) / GPIO5 (SCL)
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    // Without a panel the machine still winds; only the screen is lost
    let mut lcd = match Hd44780::new_i2c(i2c, DEFAULT_ADDRESS, Delay) {
        Ok(lcd) => Some(lcd),
        Err(e) => {
            warn!("LCD did not answer at {:#x}: {}", DEFAULT_ADDRESS, e);
            None
        }
    };

    // Keypad: rows GPIO6..10 driven, columns GPIO11..14 read
    let rows = [
        Output::new(p.PIN_6, Level::High),
        Output::new(p.PIN_7, Level::High),
        Output::new(p.PIN_8, Level::High),
        Output::new(p.PIN_9, Level::High),
        Output::new(p.PIN_10, Level::High),
    ];
    let cols = [
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
        Input::new(p.PIN_14, Pull::Up),
    ];
    let mut keypad = MatrixKeypad::new(rows, cols, KEYMAP);

    // Pedal, turn sensor and home sensor are active low
    let pedal = PinInput::new(Input::new(p.PIN_15, Pull::Up));
    let sensor = PinInput::new(Input::new(p.PIN_16, Pull::Up));
    let home = PinInput::new(Input::new(p.PIN_17, Pull::Up));
    let mut buzzer = PinOutput::new(Output::new(p.PIN_18, Level::Low));

    // Speed potentiometer on ADC0 (GPIO26)
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let pot = Channel::new_pin(p.PIN_26, Pull::None);
    let mut pot = PotInput::new(adc, pot, EIGHT_BIT_SHIFT);

    info!("Peripherals initialized");

    let timing = WINDER_CONFIG.timing;
    if let Some(lcd) = lcd.as_mut() {
        if type_out(
            lcd,
            &mut Delay,
            &templates::WATERMARK,
            timing.splash_char_ms,
            timing.splash_hold_ms,
        )
        .is_err()
        {
            warn!("Splash screen failed");
        }
    }

    let mut winder = Winder::new(WINDER_CONFIG);
    let mut tone = ToneSequencer::new();

    if WINDER_CONFIG.homing.enabled {
        winder.screen_mut().load(&templates::HOMING);
        draw(winder.screen_mut(), lcd.as_mut());

        let mut homing = Homing::new(timing.home_poll_ms);
        send(&mut tx, homing.start());
        info!("Homing...");

        loop {
            let now = clock.now_ms();
            if let Some(done) = homing.poll(home.level(), now) {
                send(&mut tx, done);
                tone.start(TonePattern::HOMED, now);
                break;
            }
            Timer::after_millis(1).await;
        }
        info!("Homed");
    }

    info!("Entering main loop");

    loop {
        let now = clock.now_ms();

        while let Some(event) = keypad.poll() {
            trace!("Key {} {}", event.key, event.state);
            winder.handle_key(event, now, &mut pot);
        }

        winder.poll_inputs(pedal.level(), sensor.level(), now);

        winder.service(now, &mut pot);

        loop {
            match rx.try_read_byte() {
                Ok(Some(byte)) => winder.receive_byte(byte),
                Ok(None) => break,
                Err(e) => {
                    warn!("Link receive error: {}", e);
                    break;
                }
            }
        }

        draw(winder.screen_mut(), lcd.as_mut());

        while let Some(effect) = winder.next_effect() {
            match effect {
                Effect::Send(command) => send(&mut tx, command),
                Effect::Log(line) => info!("{}", line.as_str()),
                Effect::Tone(pattern) => tone.start(pattern, now),
            }
        }

        buzzer.set_state(tone.update(now));

        embassy_futures::yield_now().await;
    }
}

/// Push the frame's pending changes to the panel, if there is one
fn draw<B: DisplayBackend>(screen: &mut Screen, lcd: Option<&mut B>) {
    if let Some(lcd) = lcd {
        if render(screen, lcd).is_err() {
            warn!("LCD write failed");
        }
    }
}

/// Write one command line to the motor controller
///
/// The link has no retransmission, so a failed write is logged and dropped.
fn send<T: UartTx>(tx: &mut T, command: ControllerCommand) {
    let line = match command.encode() {
        Ok(line) => line,
        Err(_) => {
            warn!("Command does not fit a line: {}", command);
            return;
        }
    };
    if tx.write_blocking(line.as_bytes()).is_err() {
        warn!("Link write failed");
    }
}

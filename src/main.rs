//! RYLR998 LoRa Node Main Application
//!
//! Entry point for the STM32L073 node. The radio receive path runs on a
//! high-priority interrupt executor so it can preempt the main loop, which
//! configures the module and then drains received records forever.

#![no_std]
#![no_main]

use defmt::{error, info, trace, warn};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::mode::Async;
use embassy_stm32::usart::{self, Uart, UartRx};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use rylr998_firmware::hal::gpio::StatusLed;
use rylr998_firmware::hal::timer::{EmbassyClock, RateLimiter};
use rylr998_firmware::hal::uart::{RadioRx, RadioTx};
use rylr998_firmware::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    AES_RNG_LPUART1 => usart::InterruptHandler<peripherals::LPUART1>;
});

/// Receive context shared by the UART task and the main loop
static RADIO_RX: RxChannel<RX_BUFFER_SIZE> = RxChannel::new();

/// Executor for the receive path, preempting the main loop
static EXECUTOR_RX: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn USART4_5() {
    EXECUTOR_RX.on_interrupt();
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("RYLR998 node firmware v{}", env!("CARGO_PKG_VERSION"));

    // HSI16 as system clock; the fault blink counts cycles at this rate
    let mut config = embassy_stm32::Config::default();
    config.rcc.hsi = true;
    config.rcc.sys = embassy_stm32::rcc::Sysclk::HSI;
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    let mut led = StatusLed::new(Output::new(p.PA5, Level::Low, Speed::Low));

    // Hold the module in reset until the UART is up
    let mut radio_reset = Output::new(p.PA8, Level::Low, Speed::Low);

    let mut uart_config = usart::Config::default();
    uart_config.baudrate = DEFAULT_BAUD_RATE;
    let uart = match Uart::new(
        p.LPUART1,
        p.PC5, // RX from module TXD
        p.PC4, // TX to module RXD
        Irqs,
        p.DMA1_CH2,
        p.DMA1_CH3,
        uart_config,
    ) {
        Ok(uart) => uart,
        Err(err) => {
            error!("LPUART1 config rejected: {}", err);
            halt(&mut led);
        }
    };
    let (tx, rx) = uart.split();

    interrupt::USART4_5.set_priority(Priority::P1);
    let rx_spawner = EXECUTOR_RX.start(interrupt::USART4_5);
    if rx_spawner.spawn(radio_rx_task(rx)).is_err() {
        error!("radio rx task failed to spawn");
        halt(&mut led);
    }

    radio_reset.set_high();
    info!("Radio released from reset");

    let mut radio = Rylr998::new(RadioTx::new(tx), EmbassyClock, &RADIO_RX);

    // +READY arrives once the module has booted
    match radio.await_response(ResponseTag::ReadyAfterBoot, RESET_TIMEOUT_MS) {
        Ok(()) | Err(Error::Timeout) => {}
        Err(err) => warn!("boot: {}", err),
    }

    if let Err(err) = configure(&mut radio, &RadioConfig::default()) {
        error!("radio configuration failed: {}", err);
        if radio.is_halted() {
            halt(&mut led);
        }
    }

    let mut heartbeat = RateLimiter::from_ms(HEARTBEAT_BLINK_MS);
    loop {
        match radio.drain(|tag, packet| match (tag, packet) {
            (ResponseTag::InboundPacket, Some(packet)) => info!("{}", packet),
            (ResponseTag::InboundPacket, None) => warn!("malformed +RCV dropped"),
            (tag, _) => info!("rx {}", tag),
        }) {
            Ok(_) => {}
            Err(Error::Halted(reason)) => {
                error!("driver halted: {}", reason);
                halt(&mut led);
            }
            Err(Error::NoTerminatorFound) => trace!("rx: partial line pending"),
            Err(err) => warn!("rx: {}", err),
        }

        if radio.is_halted() {
            error!("driver halted: {}", radio.state());
            halt(&mut led);
        }

        if heartbeat.ready() {
            led.toggle();
        }
        Timer::after_millis(1).await;
    }
}

/// Receive task: moves UART bytes into the shared ring
#[embassy_executor::task]
async fn radio_rx_task(rx: UartRx<'static, Async>) {
    RadioRx::new(rx).pump(&RADIO_RX).await
}

/// Terminal fault state: mask interrupts and blink forever
fn halt(led: &mut StatusLed<Output<'static>>) -> ! {
    error!("fault blink from LED {}", led.state());
    cortex_m::interrupt::disable();
    led.fault_blink()
}

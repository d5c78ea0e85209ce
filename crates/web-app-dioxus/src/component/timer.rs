use dioxus::prelude::*;
use futures_util::StreamExt;
use gloo_timers::future::IntervalStream;
use log::error;
use web_sys;

use vigor_web_app as web_app;

/// Rest countdown display. Ticks the underlying state machine once per
/// second and plays the audible cue when it expires. Clicking the countdown
/// skips the rest.
#[component]
pub fn Timer(control: Signal<TimerControl>) -> Element {
    use_coroutine(move |_: UnboundedReceiver<()>| async move {
        let mut interval = IntervalStream::new(1000);
        loop {
            interval.next().await;
            control.write().tick();
        }
    });

    rsx! {
        if let Some(remaining) = control.read().remaining() {
            div {
                class: "notification is-link has-text-centered py-2",
                onclick: move |_| control.write().skip(),
                span { class: "is-size-4", "{remaining} s" }
                span { class: "is-size-7 ml-2", "tap to skip" }
            }
        }
    }
}

#[derive(Clone)]
pub struct TimerControl {
    timer: web_app::RestTimer,
    audio_context: Option<web_sys::AudioContext>,
    beep_volume: u8,
}

impl TimerControl {
    pub fn new() -> Self {
        Self {
            timer: web_app::RestTimer::default(),
            audio_context: match web_sys::AudioContext::new() {
                Ok(audio_context) => Some(audio_context),
                Err(err) => {
                    error!("failed to create audio context: {err:?}");
                    None
                }
            },
            beep_volume: 80,
        }
    }

    pub fn start(&mut self, rest_seconds: u32) {
        self.timer.start(rest_seconds);
    }

    pub fn skip(&mut self) {
        self.timer.skip();
    }

    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.timer.remaining()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn set_beep_volume(&mut self, beep_volume: u8) {
        self.beep_volume = beep_volume;
    }

    pub fn tick(&mut self) {
        if self.timer.tick() {
            if let Some(audio_context) = &self.audio_context {
                let start = audio_context.current_time() + 0.01;
                for i in 0..2 {
                    if let Err(err) = play_beep(
                        audio_context,
                        2000.,
                        start + f64::from(i) * 0.17,
                        0.1,
                        self.beep_volume,
                    ) {
                        error!("failed to play beep: {err:?}");
                    }
                }
            }
        }
    }
}

impl Default for TimerControl {
    fn default() -> Self {
        Self::new()
    }
}

fn play_beep(
    audio_context: &web_sys::AudioContext,
    frequency: f32,
    start: f64,
    length: f64,
    volume: u8,
) -> Result<(), web_sys::wasm_bindgen::JsValue> {
    let oscillator = audio_context.create_oscillator()?;
    let gain = audio_context.create_gain()?;
    gain.gain().set_value(f32::from(volume) / 100.);
    gain.connect_with_audio_node(&audio_context.destination())?;
    oscillator.connect_with_audio_node(&gain)?;
    oscillator.frequency().set_value(frequency);
    oscillator.start_with_when(start)?;
    oscillator.stop_with_when(start + length)?;
    Ok(())
}

//! Menü-Task: einziger Besitzer des UI-Zustands
//!
//! Wartet auf `CLICK`/`SCROLL`, wendet die Zustandstabelle an und führt
//! die Aktionen gegen Display, Fabric und Akquise aus.

mod machine;
mod screen;

pub use machine::{
    ColorCursor, MenuAction, MenuEvent, MenuState, SubState, Transition, transition,
};
pub use screen::Screen;

use embassy_time::Timer;

use crate::config::MenuConfig;
use crate::fabric::{ClearMode, Fabric, IoFlags, Timeout, WaitCondition};
use crate::logic::color_from_sample;
use crate::traits::Display;
use crate::types::{BLACK, Color, MenuItem, Reading, Sample, ScrollSample};

pub struct MenuTask<'a, D> {
    fabric: &'a Fabric,
    screen: Screen<D>,
    config: MenuConfig,
    state: MenuState,
    /// Gehaltene Farbe für "Set Color"
    color: Color,
    /// Letzter bekannter Poti-Wert, falls die Queue beim SCROLL leer ist
    last_scroll: ScrollSample,
    dot_on: bool,
}

impl<'a, D: Display> MenuTask<'a, D> {
    pub fn new(fabric: &'a Fabric, display: D, config: MenuConfig) -> Self {
        Self {
            fabric,
            screen: Screen::new(display),
            config,
            state: MenuState::Waiting,
            color: BLACK,
            last_scroll: ScrollSample::default(),
            dot_on: false,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Aktuell gehaltene Farbe
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn display(&self) -> &D {
        self.screen.display()
    }

    pub fn display_mut(&mut self) -> &mut D {
        self.screen.display_mut()
    }

    /// Startbildschirm: Logo, Pause, "PRESS BUTTON"
    pub async fn start(&mut self) {
        self.screen.loading();
        Timer::after(self.config.splash).await;
        self.screen.continue_message();
    }

    /// Ein Warte-Durchlauf mit allen dabei gemeldeten Ereignissen
    ///
    /// CLICK wird vor SCROLL behandelt, jedes Flag direkt vor seiner
    /// Behandlung gelöscht. Nach "AGAIN" wartet SCROLL bis nach der
    /// Wiederholung.
    pub async fn step(&mut self) {
        let fabric = self.fabric;
        let events = &fabric.io_events;
        let timeout = match self.state {
            MenuState::Waiting => Timeout::After(self.config.idle_blink),
            _ => Timeout::Forever,
        };

        let flags = match events
            .wait(IoFlags::ALL, WaitCondition::Any, ClearMode::NoClear, timeout)
            .await
        {
            Ok(flags) => flags,
            Err(_) => {
                self.handle(MenuEvent::IdleTimeout).await;
                return;
            }
        };

        if flags.contains(IoFlags::CLICK) {
            let replay = matches!(
                self.state,
                MenuState::Sub {
                    sub: SubState::Repeat,
                    ..
                }
            );
            events.clear(IoFlags::CLICK);
            self.handle(MenuEvent::Click).await;
            if replay {
                // SCROLL bleibt gesetzt, sonst würde es den zu wiederholenden
                // Eintrag im Hauptmenü umwählen
                return;
            }
        }
        if flags.contains(IoFlags::SCROLL) {
            events.clear(IoFlags::SCROLL);
            if let Some(sample) = fabric.scroll.drain_latest() {
                self.last_scroll = sample;
            }
            self.handle(MenuEvent::Scroll(self.last_scroll)).await;
        }
    }

    /// Wendet ein Ereignis an
    pub async fn handle(&mut self, event: MenuEvent) {
        let Transition { next, action } = transition(self.state, event);
        if next != self.state {
            debug!("menu {} -> {}", self.state, next);
        }
        self.state = next;
        self.perform(action).await;
    }

    async fn perform(&mut self, action: MenuAction) {
        match action {
            MenuAction::Nothing => {}
            MenuAction::ToggleIdleDot => {
                self.dot_on = !self.dot_on;
                self.screen.continue_dot(self.dot_on);
            }
            MenuAction::ShowMainMenu => {
                self.screen.blank();
                self.screen.main_menu();
            }
            MenuAction::RunItem(item) => self.run_item(item).await,
            MenuAction::HighlightItem { item, position } => {
                self.screen.highlight_item(item);
                self.screen.scroll_indicator(position);
            }
            MenuAction::HighlightChoice(choice) => self.screen.highlight_choice(choice),
            MenuAction::CommitChannel { next } => {
                self.fabric.publish_color(self.color);
                self.screen.cursor_label(next);
            }
            MenuAction::AdjustChannel { channel, value } => {
                channel.set(&mut self.color, value);
                self.screen.slider(channel, value);
                self.screen.channel_value(channel, value);
            }
            MenuAction::Repeat => {
                self.color = BLACK;
                self.screen.blank();
                // Nächster Durchlauf führt den Eintrag erneut aus
                self.fabric.io_events.set(IoFlags::CLICK);
            }
        }
    }

    async fn run_item(&mut self, item: MenuItem) {
        info!("run menu item {}", item);
        match item {
            MenuItem::Measurement => {
                let reading = self.fabric.request_measurement().await;
                self.screen.item_menu("MEASURE", "AGAIN", "BACK");
                if let Some(sample) = self.checked(reading) {
                    self.screen.measurement(&sample);
                }
            }
            MenuItem::LuxCct => {
                let reading = self.fabric.request_measurement().await;
                self.screen.item_menu("LUX + CCT", "AGAIN", "BACK");
                if let Some(sample) = self.checked(reading) {
                    self.screen.lux_cct(&sample);
                }
            }
            MenuItem::GetColor => {
                self.screen.item_menu("GET Color", "AGAIN", "BACK");
                self.fabric.publish_color(self.config.illumination);
                Timer::after(self.config.illumination_settle).await;
                let reading = self.fabric.request_measurement().await;
                self.fabric.publish_color(BLACK);
                if let Some(sample) = self.checked(reading) {
                    self.screen.color_result(color_from_sample(&sample));
                }
                self.color = BLACK;
            }
            MenuItem::SetColor => self.screen.set_color_menu(self.color),
        }
    }

    /// Fehlerhafte Messung als Meldung anzeigen statt Werte
    fn checked(&mut self, reading: Reading) -> Option<Sample> {
        match reading {
            Ok(sample) => Some(sample),
            Err(e) => {
                error!("measurement failed: {}", e);
                self.screen.sensor_error();
                None
            }
        }
    }

    /// Menu Logic - Startbildschirm, dann Endlosschleife
    pub async fn run(mut self) -> ! {
        self.start().await;
        loop {
            self.step().await;
        }
    }
}

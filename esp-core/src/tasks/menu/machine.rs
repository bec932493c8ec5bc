//! Zustandstabelle des Menüs
//!
//! `transition()` ist eine reine Funktion: (Zustand, Ereignis) → (Folgezustand,
//! Aktion). Ausgeführt werden die Aktionen von `MenuTask`.

use crate::logic::{channel_from_raw, choice_for_position, item_for_position};
use crate::types::{Choice, ColorChannel, MenuItem, ScrollSample};

/// Cursor im "Set Color"-Untermenü
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorCursor {
    Red,
    Green,
    Blue,
    /// Alle Kanäle bestätigt, Auswahl AGAIN/BACK
    AgainBack,
}

impl ColorCursor {
    /// Kanal unter dem Cursor
    pub fn channel(self) -> Option<ColorChannel> {
        match self {
            ColorCursor::Red => Some(ColorChannel::Red),
            ColorCursor::Green => Some(ColorChannel::Green),
            ColorCursor::Blue => Some(ColorChannel::Blue),
            ColorCursor::AgainBack => None,
        }
    }

    /// Nächste Position, bleibt auf `AgainBack` stehen
    pub fn next(self) -> Self {
        match self {
            ColorCursor::Red => ColorCursor::Green,
            ColorCursor::Green => ColorCursor::Blue,
            ColorCursor::Blue | ColorCursor::AgainBack => ColorCursor::AgainBack,
        }
    }
}

/// Zustand innerhalb eines Untermenüs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubState {
    /// Noch keine Auswahl
    None,
    Repeat,
    Back,
    SetColor(ColorCursor),
}

impl From<Choice> for SubState {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Repeat => SubState::Repeat,
            Choice::Back => SubState::Back,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuState {
    /// Startbildschirm, wartet auf den ersten Klick
    Waiting,
    Main {
        selected: Option<MenuItem>,
    },
    Sub {
        item: MenuItem,
        sub: SubState,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEvent {
    /// Kein Ereignis innerhalb des Blink-Takts (nur in `Waiting`)
    IdleTimeout,
    Click,
    Scroll(ScrollSample),
}

/// Was der Menü-Task nach einem Übergang tun muss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    Nothing,
    ToggleIdleDot,
    /// Bildschirm leeren und Hauptmenü zeichnen
    ShowMainMenu,
    RunItem(MenuItem),
    HighlightItem { item: MenuItem, position: u16 },
    HighlightChoice(Choice),
    /// Aktuelle Farbe veröffentlichen, Cursor-Beschriftung für `next` zeichnen
    CommitChannel { next: ColorCursor },
    /// Kanal lokal setzen und Schieberegler neu zeichnen
    AdjustChannel { channel: ColorChannel, value: u8 },
    /// Werte zurücksetzen und letzten Eintrag per Klick wiederholen
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: MenuState,
    pub action: MenuAction,
}

impl Transition {
    const fn new(next: MenuState, action: MenuAction) -> Self {
        Self { next, action }
    }

    const fn stay(state: MenuState) -> Self {
        Self::new(state, MenuAction::Nothing)
    }
}

/// Übergangstabelle des Menüs
pub fn transition(state: MenuState, event: MenuEvent) -> Transition {
    use MenuAction as A;
    use MenuEvent as E;
    use MenuState as S;

    match (state, event) {
        (S::Waiting, E::IdleTimeout) => Transition::new(state, A::ToggleIdleDot),
        (S::Waiting, E::Click) => Transition::new(S::Main { selected: None }, A::ShowMainMenu),
        (S::Waiting, E::Scroll(_)) => Transition::stay(state),

        // Ohne markierten Eintrag gibt es nichts zu öffnen
        (S::Main { selected: None }, E::Click) => Transition::stay(state),
        (S::Main { selected: Some(item) }, E::Click) => {
            let sub = match item {
                MenuItem::SetColor => SubState::SetColor(ColorCursor::Red),
                _ => SubState::None,
            };
            Transition::new(S::Sub { item, sub }, A::RunItem(item))
        }
        (S::Main { .. }, E::Scroll(sample)) => {
            let item = item_for_position(sample.scaled);
            Transition::new(
                S::Main {
                    selected: Some(item),
                },
                A::HighlightItem {
                    item,
                    position: sample.scaled,
                },
            )
        }

        (S::Sub { item, sub }, E::Click) => match sub {
            SubState::Back => Transition::new(
                S::Main {
                    selected: Some(item),
                },
                A::ShowMainMenu,
            ),
            SubState::Repeat => Transition::new(
                S::Main {
                    selected: Some(item),
                },
                A::Repeat,
            ),
            SubState::SetColor(cursor) if cursor != ColorCursor::AgainBack => {
                let next = cursor.next();
                Transition::new(
                    S::Sub {
                        item,
                        sub: SubState::SetColor(next),
                    },
                    A::CommitChannel { next },
                )
            }
            _ => Transition::stay(state),
        },
        (S::Sub { item, sub }, E::Scroll(sample)) => match sub {
            SubState::SetColor(cursor) => match cursor.channel() {
                Some(channel) => Transition::new(
                    state,
                    A::AdjustChannel {
                        channel,
                        value: channel_from_raw(sample.raw),
                    },
                ),
                None => choose(item, sample),
            },
            _ => choose(item, sample),
        },

        (S::Main { .. } | S::Sub { .. }, E::IdleTimeout) => Transition::stay(state),
    }
}

fn choose(item: MenuItem, sample: ScrollSample) -> Transition {
    let choice = choice_for_position(sample.scaled);
    Transition::new(
        MenuState::Sub {
            item,
            sub: choice.into(),
        },
        MenuAction::HighlightChoice(choice),
    )
}

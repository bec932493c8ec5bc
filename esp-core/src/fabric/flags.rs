//! Event-Flag-Gruppen
//!
//! Ein Bitmaske hinter einem Critical-Section-Mutex plus Waker-Liste.
//! Flags sind "sticky": einmal gesetzt bleiben sie gesetzt bis ihr
//! Konsument sie löscht.

use core::cell::RefCell;
use core::future::poll_fn;
use core::marker::PhantomData;
use core::task::{Context, Poll};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::waitqueue::MultiWakerRegistration;
use embassy_time::with_timeout;

use super::Timeout;

/// Maximale Anzahl gleichzeitig wartender Tasks pro Gruppe
pub const MAX_WAITERS: usize = 4;

/// Eine geschlossene Menge benannter Flags (eine Gruppe)
pub trait FlagSet: Copy {
    fn bits(self) -> u32;
    fn from_bits(bits: u32) -> Self;
}

/// Definiert einen Flag-Typ mit Bit-Konstanten
///
/// Jede Gruppe bekommt einen eigenen Typ, damit Flags verschiedener
/// Gruppen nicht gemischt werden können.
macro_rules! flag_set {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* const $flag:ident = $bit:expr; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        $vis struct $name(u32);

        impl $name {
            $( $(#[$fmeta])* pub const $flag: Self = Self($bit); )*

            /// Keine Flags
            pub const EMPTY: Self = Self(0);

            /// Alle Flags der Gruppe
            pub const ALL: Self = Self(0 $( | $bit )*);

            pub const fn bits(self) -> u32 {
                self.0
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// Alle Bits von `other` sind gesetzt
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// Mindestens ein Bit von `other` ist gesetzt
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }
        }

        impl $crate::fabric::FlagSet for $name {
            fn bits(self) -> u32 {
                self.0
            }

            fn from_bits(bits: u32) -> Self {
                Self(bits & Self::ALL.0)
            }
        }

        impl core::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl core::ops::BitAnd for $name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }
    };
}

flag_set! {
    /// Eingabe-Ereignisse (Input-Task → Menü)
    pub struct IoFlags {
        /// Taster wurde gedrückt und losgelassen
        const CLICK = 1 << 0;
        /// Neuer Potentiometer-Wert in der Scroll-Queue
        const SCROLL = 1 << 1;
    }
}

flag_set! {
    /// Mess- und Farb-Ereignisse (Menü ↔ Akquise, Bridge → LED)
    pub struct AcquisitionFlags {
        /// Menü fordert eine Messung an
        const MEASUREMENT_NEEDED = 1 << 0;
        /// Messung liegt in einer der Ergebnis-Queues
        const MEASUREMENT_DONE = 1 << 1;
        /// Neue Farbe in der Farb-Queue
        const NEW_COLOR = 1 << 2;
    }
}

/// Wann eine Wartebedingung erfüllt ist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitCondition {
    /// Mindestens ein Flag der Maske
    Any,
    /// Alle Flags der Maske
    All,
}

/// Ob erfüllte Flags beim Aufwachen gelöscht werden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClearMode {
    AutoClear,
    /// Der Wartende löscht selbst mit `clear()`
    NoClear,
}

/// Fehler beim Warten auf Flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlagsError {
    Timeout,
}

struct State {
    bits: u32,
    wakers: MultiWakerRegistration<MAX_WAITERS>,
}

/// Gruppe von sticky Event-Flags
///
/// Mehrere Tasks dürfen gleichzeitig auf dieselbe Gruppe warten.
/// Setzen und Löschen ist aus jedem Kontext erlaubt (auch Interrupts).
pub struct EventFlags<F> {
    state: Mutex<CriticalSectionRawMutex, RefCell<State>>,
    _flags: PhantomData<fn() -> F>,
}

impl<F: FlagSet> EventFlags<F> {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(State {
                bits: 0,
                wakers: MultiWakerRegistration::new(),
            })),
            _flags: PhantomData,
        }
    }

    /// Setzt Flags und weckt alle Wartenden
    pub fn set(&self, mask: F) {
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            state.bits |= mask.bits();
            state.wakers.wake();
        });
    }

    /// Löscht Flags
    pub fn clear(&self, mask: F) {
        self.state.lock(|cell| {
            cell.borrow_mut().bits &= !mask.bits();
        });
    }

    /// Aktuell gesetzte Flags
    pub fn get(&self) -> F {
        self.state.lock(|cell| F::from_bits(cell.borrow().bits))
    }

    /// Wartet bis die Bedingung über `mask` erfüllt ist
    ///
    /// Liefert die gesetzten Bits innerhalb von `mask`.
    pub async fn wait(
        &self,
        mask: F,
        condition: WaitCondition,
        clear: ClearMode,
        timeout: Timeout,
    ) -> Result<F, FlagsError> {
        let wait = poll_fn(|cx| self.poll_wait(mask, condition, clear, Some(cx)));
        match timeout {
            Timeout::NoWait => match self.poll_wait(mask, condition, clear, None) {
                Poll::Ready(bits) => Ok(bits),
                Poll::Pending => Err(FlagsError::Timeout),
            },
            Timeout::After(duration) => with_timeout(duration, wait)
                .await
                .map_err(|_| FlagsError::Timeout),
            Timeout::Forever => Ok(wait.await),
        }
    }

    fn poll_wait(
        &self,
        mask: F,
        condition: WaitCondition,
        clear: ClearMode,
        cx: Option<&mut Context<'_>>,
    ) -> Poll<F> {
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            let matched = state.bits & mask.bits();
            let satisfied = match condition {
                WaitCondition::Any => matched != 0,
                WaitCondition::All => matched == mask.bits(),
            };
            if satisfied {
                if clear == ClearMode::AutoClear {
                    state.bits &= !matched;
                }
                Poll::Ready(F::from_bits(matched))
            } else {
                if let Some(cx) = cx {
                    state.wakers.register(cx.waker());
                }
                Poll::Pending
            }
        })
    }
}

impl<F: FlagSet> Default for EventFlags<F> {
    fn default() -> Self {
        Self::new()
    }
}

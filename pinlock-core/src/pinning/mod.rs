// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pinning Strategies
//!
//! The validation core: the pin set, the closed failure taxonomy, and
//! the three interchangeable strategies (exact certificate, public-key
//! hash, SPKI hash) dispatched over a single tagged type.

mod error;
mod pin_set;
mod strategy;

pub use error::PinningError;
pub use pin_set::PinSet;
pub use strategy::PinningStrategy;

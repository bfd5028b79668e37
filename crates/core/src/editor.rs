//! Label form state.
//!
//! [`LabelEditor`] owns everything the user can change: both addresses, the
//! weight and the label size. All changes go through its methods. Methods
//! take `&self`; the state sits behind a mutex that is only held for the
//! synchronous part of each call, so an auto-fill for the sender and one for
//! the receiver can be awaited at the same time.
//!
//! # Example
//!
//! ```rust
//! use shiplabel_core::{AddressField, LabelEditor, Side};
//!
//! let editor = LabelEditor::new();
//! editor.edit_field(Side::Receiver, AddressField::Name, "Ali Khan");
//! editor.set_weight("2.5");
//! editor.select_label_size("4x4").unwrap();
//!
//! let preview = editor.preview();
//! assert_eq!(preview.receiver.name, "Ali Khan");
//! assert_eq!(preview.size.id, "4x4");
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::address::{Address, AddressField, DEFAULT_COUNTRY, Side, fallback_country};
use crate::dimension::{Axis, LabelDimension, label_sizes};
use crate::normalize::AddressParser;
use crate::preview::LabelPreview;
use crate::{LabelError, Result};

/// Weight shown on a fresh label.
pub const DEFAULT_WEIGHT: &str = "1";

/// What a call to [`LabelEditor::request_auto_fill`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoFill {
    /// The side's address was replaced with this one.
    Applied(Address),
    /// Nothing was sent to the parser.
    Skipped(SkipReason),
}

/// Why an auto-fill request was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The text was empty or whitespace.
    EmptyInput,
    /// An auto-fill for the same side has not finished yet.
    InFlight,
}

#[derive(Debug)]
struct FormState {
    sender: Address,
    receiver: Address,
    weight: String,
    sizes: [LabelDimension; 3],
    selected: usize,
    sender_busy: bool,
    receiver_busy: bool,
}

impl FormState {
    fn address_mut(&mut self, side: Side) -> &mut Address {
        match side {
            Side::Sender => &mut self.sender,
            Side::Receiver => &mut self.receiver,
        }
    }

    fn address(&self, side: Side) -> &Address {
        match side {
            Side::Sender => &self.sender,
            Side::Receiver => &self.receiver,
        }
    }

    fn busy_mut(&mut self, side: Side) -> &mut bool {
        match side {
            Side::Sender => &mut self.sender_busy,
            Side::Receiver => &mut self.receiver_busy,
        }
    }
}

/// Editable label state: sender, receiver, weight and size.
#[derive(Debug)]
pub struct LabelEditor {
    state: Mutex<FormState>,
    default_country: String,
}

impl LabelEditor {
    /// An empty form with [`DEFAULT_COUNTRY`] as the country fallback.
    pub fn new() -> Self {
        Self::with_default_country(DEFAULT_COUNTRY)
    }

    /// An empty form with the given country fallback ([`DEFAULT_COUNTRY`] if blank).
    pub fn with_default_country(default_country: impl Into<String>) -> Self {
        let default_country: String = default_country.into();
        let default_country = fallback_country(&default_country).to_string();
        let state = FormState {
            sender: Address::empty(&default_country),
            receiver: Address::empty(&default_country),
            weight: DEFAULT_WEIGHT.to_string(),
            sizes: label_sizes(),
            selected: 0,
            sender_busy: false,
            receiver_busy: false,
        };
        Self { state: Mutex::new(state), default_country }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Country used for empty and cleared addresses.
    pub fn default_country(&self) -> &str {
        &self.default_country
    }

    /// Replaces one field of one address. No validation is done.
    pub fn edit_field(&self, side: Side, field: AddressField, value: impl Into<String>) {
        self.state().address_mut(side).set(field, value);
    }

    /// Empties one address; its country goes back to the fallback.
    pub fn clear_address(&self, side: Side) {
        let country = self.default_country.clone();
        self.state().address_mut(side).clear(&country);
    }

    /// Sends `raw_text` to `parser` and, on success, replaces the side's address.
    ///
    /// Blank text and a request for a side that is already being filled are
    /// skipped without calling the parser. On failure the address is left as
    /// it was and the error is returned for the caller to report. The side is
    /// marked idle again however the call ends, including when the returned
    /// future is dropped before completing.
    pub async fn request_auto_fill<P>(&self, side: Side, raw_text: &str, parser: &P) -> Result<AutoFill>
    where
        P: AddressParser + ?Sized,
    {
        if raw_text.trim().is_empty() {
            tracing::debug!(%side, "auto-fill skipped: empty text");
            return Ok(AutoFill::Skipped(SkipReason::EmptyInput));
        }

        let Some(_busy) = self.mark_busy(side) else {
            tracing::debug!(%side, "auto-fill skipped: already in flight");
            return Ok(AutoFill::Skipped(SkipReason::InFlight));
        };

        tracing::debug!(%side, parser = parser.name(), "auto-fill started");
        match parser.parse_address(raw_text).await {
            Ok(address) => {
                *self.state().address_mut(side) = address.clone();
                tracing::info!(%side, "auto-fill applied");
                Ok(AutoFill::Applied(address))
            }
            Err(err) => {
                tracing::warn!(%side, error = %err, "auto-fill failed");
                Err(err)
            }
        }
    }

    fn mark_busy(&self, side: Side) -> Option<BusyGuard<'_>> {
        let mut state = self.state();
        let busy = state.busy_mut(side);
        if *busy {
            return None;
        }
        *busy = true;
        Some(BusyGuard { editor: self, side })
    }

    /// Whether an auto-fill for `side` is outstanding.
    pub fn is_auto_filling(&self, side: Side) -> bool {
        let mut state = self.state();
        *state.busy_mut(side)
    }

    /// Sets the free-form weight text.
    pub fn set_weight(&self, value: impl Into<String>) {
        self.state().weight = value.into();
    }

    /// Selects a label size by id (`4x6`, `4x4` or `custom`).
    pub fn select_label_size(&self, id: &str) -> Result<()> {
        let mut state = self.state();
        let index = state
            .sizes
            .iter()
            .position(|s| s.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| LabelError::UnknownLabelSize(id.to_string()))?;
        state.selected = index;
        Ok(())
    }

    /// Overwrites the custom size's width or height, in inches.
    ///
    /// Only applies while `custom` is selected and `inches` is a positive
    /// number. Returns whether the size changed.
    pub fn set_custom_dimension(&self, axis: Axis, inches: f64) -> bool {
        if !inches.is_finite() || inches <= 0.0 {
            return false;
        }

        let mut state = self.state();
        let selected = state.selected;
        let size = &mut state.sizes[selected];
        if !size.is_custom() {
            return false;
        }
        match axis {
            Axis::Width => size.width = inches,
            Axis::Height => size.height = inches,
        }
        true
    }

    /// Copy of one address.
    pub fn address(&self, side: Side) -> Address {
        self.state().address(side).clone()
    }

    /// Current weight text.
    pub fn weight(&self) -> String {
        self.state().weight.clone()
    }

    /// The selected label size.
    pub fn label_size(&self) -> LabelDimension {
        let state = self.state();
        state.sizes[state.selected].clone()
    }

    /// All selectable sizes, with any custom edits applied.
    pub fn label_sizes(&self) -> Vec<LabelDimension> {
        self.state().sizes.to_vec()
    }

    /// Snapshot of everything the label shows.
    pub fn preview(&self) -> LabelPreview {
        let state = self.state();
        LabelPreview {
            sender: state.sender.clone(),
            receiver: state.receiver.clone(),
            weight: state.weight.clone(),
            size: state.sizes[state.selected].clone(),
        }
    }
}

impl Default for LabelEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears a side's in-flight flag when dropped.
struct BusyGuard<'a> {
    editor: &'a LabelEditor,
    side: Side,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.editor.state().busy_mut(self.side) = false;
    }
}

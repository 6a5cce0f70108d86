//! Field names used by the dummy surface-layer component.

use twc_core::FieldName;

/// First driving field.
pub const DRIVING_A: FieldName = "driving_a";
/// Second driving field.
pub const DRIVING_B: FieldName = "driving_b";
/// Third driving field.
pub const DRIVING_C: FieldName = "driving_c";

/// Ancillary field.
pub const ANCILLARY_C: FieldName = "ancillary_c";

/// Inbound transfer added into `transfer_j`.
pub const TRANSFER_K: FieldName = "transfer_k";
/// Inbound transfer added into `transfer_i`.
pub const TRANSFER_L: FieldName = "transfer_l";
/// Inbound transfer added into `output_x`.
pub const TRANSFER_N: FieldName = "transfer_n";

/// Outbound transfer.
pub const TRANSFER_I: FieldName = "transfer_i";
/// Outbound transfer.
pub const TRANSFER_J: FieldName = "transfer_j";

/// State incremented by one each timestep.
pub const STATE_A: FieldName = "state_a";
/// State incremented by two each timestep.
pub const STATE_B: FieldName = "state_b";

/// Diagnostic output.
pub const OUTPUT_X: FieldName = "output_x";

/// Units of every dummy field.
pub const UNITS: &str = "1";

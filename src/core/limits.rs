/*!
 * System Limits and Constants
 *
 * Centralized location for the handle table bounds, legacy buffer sizes and
 * the other magic numbers of the legacy file layer.
 *
 * - Values fixed by the legacy ABI are marked with [LEGACY-COMPAT]
 */

// =============================================================================
// HANDLE TABLE LIMITS
// =============================================================================

/// Smallest handle table a process may have
/// [LEGACY-COMPAT] The process descriptor embeds 20 slots
pub const MIN_HANDLES: usize = 20;

/// Largest handle table a process may request
/// [LEGACY-COMPAT] Slots are bytes and 0xff marks an empty slot
pub const MAX_HANDLES: usize = 254;

/// Numeric value of an empty slot
/// Host descriptors at or above this value cannot be stored in a slot
pub const SENTINEL: i32 = 0xff;

/// Host descriptors below this value belong to the runtime (stdin/stdout/stderr)
/// and must never be closed through a legacy handle
pub const RESERVED_HOST_DESCRIPTORS: i32 = 3;

// =============================================================================
// PATH LIMITS
// =============================================================================

/// Size of the path buffer in the open-file record, terminator included
/// [LEGACY-COMPAT]
pub const OFS_MAX_PATH: usize = 128;

// =============================================================================
// TEMPORARY NAMES
// =============================================================================

/// Extension of every synthesized temporary file
pub const TEMP_EXTENSION: &str = "tmp";

/// Number of prefix characters kept in a temporary name
pub const TEMP_PREFIX_LEN: usize = 3;

/// Size of the temporary-name counter space
pub const TEMP_COUNTER_SPACE: u32 = 0x1_0000;

/// Drive byte flag selecting an explicit drive for temporary names
/// [LEGACY-COMPAT] TF_FORCEDRIVE
pub const TEMP_FORCE_DRIVE: u8 = 0x80;

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Operations slower than this are reported by the operation span (10ms)
pub const SLOW_OPERATION_MICROS: u128 = 10_000;

//! Netmask to prefix-length conversion.

use thiserror::Error;

/// Longest mask accepted, in bytes (an IPv6 netmask).
const MAX_MASK_LEN: usize = 16;

/// Error type for netmask conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetmaskError {
    /// A one bit follows a zero bit.
    #[error("Netmask is not contiguous (hole at byte {byte_index})")]
    NonContiguous {
        /// Index of the first byte breaking the run of ones.
        byte_index: usize,
    },

    /// The mask is longer than an IPv6 netmask.
    #[error("Netmask of {0} bytes is too long")]
    TooLong(usize),
}

/// Counts the leading one bits of a contiguous netmask.
///
/// An empty mask has prefix length 0.
///
/// # Errors
///
/// - [`NetmaskError::NonContiguous`] if any one bit follows a zero bit.
/// - [`NetmaskError::TooLong`] for masks over 16 bytes.
///
/// # Examples
///
/// ```
/// use cast_addr::interfaces::prefix_length;
///
/// assert_eq!(prefix_length(&[255, 255, 255, 0]), Ok(24));
/// assert_eq!(prefix_length(&[255, 255, 224, 0]), Ok(19));
/// assert!(prefix_length(&[255, 0, 255, 0]).is_err());
/// ```
pub fn prefix_length(mask: &[u8]) -> Result<u8, NetmaskError> {
    if mask.len() > MAX_MASK_LEN {
        return Err(NetmaskError::TooLong(mask.len()));
    }

    let full = mask.iter().take_while(|&&byte| byte == 0xff).count();
    let mut length = full * 8;

    if let Some((&partial, tail)) = mask[full..].split_first() {
        let ones = partial.leading_ones();
        // ones < 8 here, so the shift keeps only the bits after the run
        if partial << ones != 0 {
            return Err(NetmaskError::NonContiguous { byte_index: full });
        }
        length += ones as usize;

        if let Some(offset) = tail.iter().position(|&byte| byte != 0) {
            return Err(NetmaskError::NonContiguous {
                byte_index: full + 1 + offset,
            });
        }
    }

    u8::try_from(length).map_err(|_| NetmaskError::TooLong(mask.len()))
}

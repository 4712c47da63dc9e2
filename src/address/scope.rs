//! Interface name ↔ IPv6 scope id resolution.
//!
//! Zone suffixes (`fe80::1%eth0`) name an interface; the address stores the
//! interface index. The lookup is abstracted behind [`ScopeResolver`] so that
//! parsing and formatting can be exercised without touching the OS.

/// Capability for translating between interface names and scope ids.
///
/// Both directions may fail. Parsing treats a failed lookup as "not a name"
/// and falls back to a decimal scope id; formatting falls back to printing
/// the numeric id.
pub trait ScopeResolver: Send + Sync {
    /// Returns the interface index for `name`, or `None` if there is no such interface.
    fn name_to_index(&self, name: &str) -> Option<u32>;

    /// Returns the interface name for `index`, or `None` if it cannot be resolved.
    fn index_to_name(&self, index: u32) -> Option<String>;
}

impl<T: ScopeResolver + ?Sized> ScopeResolver for &T {
    fn name_to_index(&self, name: &str) -> Option<u32> {
        (*self).name_to_index(name)
    }

    fn index_to_name(&self, index: u32) -> Option<String> {
        (*self).index_to_name(index)
    }
}

/// Resolver that knows no interface names.
///
/// Zones must be given as decimal ids and are always printed as numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericScopes;

impl ScopeResolver for NumericScopes {
    fn name_to_index(&self, _name: &str) -> Option<u32> {
        None
    }

    fn index_to_name(&self, _index: u32) -> Option<String> {
        None
    }
}

/// Resolver backed by the operating system's interface table.
///
/// Uses `if_nametoindex(3)` / `if_indextoname(3)` on Unix. Elsewhere it
/// behaves like [`NumericScopes`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemScopeResolver;

#[cfg(unix)]
impl ScopeResolver for SystemScopeResolver {
    fn name_to_index(&self, name: &str) -> Option<u32> {
        let name = std::ffi::CString::new(name).ok()?;
        // SAFETY: `name` is a valid NUL-terminated string for the duration of the call.
        let index = unsafe { libc::if_nametoindex(name.as_ptr()) };
        (index != 0).then_some(index)
    }

    fn index_to_name(&self, index: u32) -> Option<String> {
        let mut buffer = [0 as libc::c_char; libc::IF_NAMESIZE];
        // SAFETY: `buffer` is IF_NAMESIZE bytes long, as if_indextoname requires.
        let result = unsafe { libc::if_indextoname(index, buffer.as_mut_ptr()) };
        if result.is_null() {
            return None;
        }
        // SAFETY: on success the buffer holds a NUL-terminated interface name.
        let name = unsafe { std::ffi::CStr::from_ptr(buffer.as_ptr()) };
        Some(name.to_string_lossy().into_owned())
    }
}

#[cfg(not(unix))]
impl ScopeResolver for SystemScopeResolver {
    fn name_to_index(&self, _name: &str) -> Option<u32> {
        None
    }

    fn index_to_name(&self, _index: u32) -> Option<String> {
        None
    }
}

//! C++ to ctypes type mapping
//!
//! Builtin scalar types map to their `ctypes` counterparts. Multi-word
//! builtins are looked up by word set, so `unsigned long int` and
//! `long unsigned int` resolve identically.

/// Builtin mappings, keyed by the words of the type name sorted
/// alphabetically and joined with single spaces.
static BUILTIN_CTYPES: &[(&str, &str)] = &[
    ("bool", "c_bool"),
    ("char", "c_char"),
    ("wchar_t", "c_wchar"),
    ("char unsigned", "c_ubyte"),
    ("short", "c_short"),
    ("int short", "c_short"),
    ("short unsigned", "c_ushort"),
    ("int short unsigned", "c_ushort"),
    ("int", "c_int"),
    ("unsigned", "c_uint"),
    ("int unsigned", "c_uint"),
    ("long", "c_long"),
    ("int long", "c_long"),
    ("long unsigned", "c_ulong"),
    ("int long unsigned", "c_ulong"),
    ("long long", "c_longlong"),
    ("int long long", "c_longlong"),
    ("long long unsigned", "c_ulonglong"),
    ("int long long unsigned", "c_ulonglong"),
    ("float", "c_float"),
    ("double", "c_double"),
    ("double long", "c_longdouble"),
    ("std::string", "c_char_p"),
    ("int8_t", "c_int8"),
    ("uint8_t", "c_uint8"),
    ("int16_t", "c_int16"),
    ("uint16_t", "c_uint16"),
    ("int32_t", "c_int32"),
    ("uint32_t", "c_uint32"),
    ("int64_t", "c_int64"),
    ("uint64_t", "c_uint64"),
    ("intptr_t", "c_int"),
    ("uintptr_t", "c_uint"),
    ("int_fast8_t", "c_int"),
    ("int_fast16_t", "c_int"),
    ("int_fast32_t", "c_int"),
    ("int_fast64_t", "c_int64"),
    ("uint_fast8_t", "c_uint"),
    ("uint_fast16_t", "c_uint"),
    ("uint_fast32_t", "c_uint"),
    ("uint_fast64_t", "c_uint64"),
    ("int_least8_t", "c_int"),
    ("int_least16_t", "c_int"),
    ("int_least32_t", "c_int"),
    ("int_least64_t", "c_int64"),
    ("uint_least8_t", "c_uint"),
    ("uint_least16_t", "c_uint"),
    ("uint_least32_t", "c_uint"),
    ("uint_least64_t", "c_uint64"),
    ("intmax_t", "c_int64"),
    ("uintmax_t", "c_uint64"),
];

/// Sort the words of a multi-word builtin name into the lookup key form
fn canonical_key(name: &str) -> String {
    let mut words: Vec<&str> = name.split_whitespace().collect();
    words.sort_unstable();
    words.join(" ")
}

/// Look up the ctypes name for a builtin C++ type, e.g. `int` -> `c_int`
///
/// Returns `None` for user-defined names; the emitter resolves those
/// against the declarations it has seen.
pub fn builtin_ctype(name: &str) -> Option<&'static str> {
    let key = canonical_key(name);
    BUILTIN_CTYPES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Whether a ctypes name has a pointer shorthand (`c_char` -> `c_char_p`)
pub fn pointer_shorthand(ctype: &str) -> Option<&'static str> {
    match ctype {
        "c_char" => Some("c_char_p"),
        "c_wchar" => Some("c_wchar_p"),
        _ => None,
    }
}

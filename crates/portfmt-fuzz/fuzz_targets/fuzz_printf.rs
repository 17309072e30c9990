#![no_main]
use libfuzzer_sys::fuzz_target;
use portfmt_core::{FormatArg, format_into, format_to_vec};

const TEXT: &[u8] = b"fuzz`text\0tail";

/// Longest rendering re-run through `format_to_vec`.
const MAX_UNBOUNDED_LEN: usize = 1 << 20;

fuzz_target!(|data: &[u8]| {
    // Layout: [capacity][seed][format bytes...]
    if data.len() < 2 {
        return;
    }
    let capacity = usize::from(data[0]);
    let seed = data[1];
    let fmt = &data[2..];

    let int = i32::from(seed as i8) * 1000;
    let args = [
        FormatArg::Int(int),
        FormatArg::UInt(u32::from(seed)),
        FormatArg::LongLong(i64::from(int) << 20),
        FormatArg::Double(f64::from(int) / 7.0),
        FormatArg::Str(if seed & 1 == 0 { Some(TEXT) } else { None }),
        FormatArg::Bytes(TEXT),
        FormatArg::Pointer(usize::from(seed) << 12),
        FormatArg::Size(usize::from(seed)),
    ];

    let mut buf = vec![0xA5u8; capacity];
    match format_into(&mut buf, fmt, &args) {
        Ok(len) => {
            if capacity > 0 {
                let written = len.min(capacity - 1);
                assert_eq!(buf[written], 0, "terminator must follow the stored bytes");
                // The stored bytes are a prefix of the unbounded rendering.
                if len <= MAX_UNBOUNDED_LEN {
                    let full = format_to_vec(fmt, &args).expect("bounded run succeeded");
                    assert_eq!(full.len(), len);
                    assert_eq!(&buf[..written], &full[..written]);
                }
            }
        }
        Err(err) => {
            // Errors still leave a terminated buffer.
            if capacity > 0 {
                assert!(buf.contains(&0), "{err}");
            }
        }
    }
});

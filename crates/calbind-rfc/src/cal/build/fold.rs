//! Content line folding (RFC 5545 §3.1).

/// Maximum octets per physical line, excluding the line break.
const MAX_LINE_OCTETS: usize = 75;

/// Folds a logical content line into physical lines of at most 75 octets,
/// continuation lines prefixed with a single space. Splits only at character
/// boundaries so multi-byte UTF-8 sequences stay intact.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut remaining = line;
    let mut first = true;

    while !remaining.is_empty() {
        // The continuation space counts against the limit.
        let budget = if first {
            MAX_LINE_OCTETS
        } else {
            MAX_LINE_OCTETS - 1
        };

        if remaining.len() <= budget {
            if !first {
                out.push_str("\r\n ");
            }
            out.push_str(remaining);
            break;
        }

        let mut split = budget;
        while !remaining.is_char_boundary(split) {
            split -= 1;
        }

        if !first {
            out.push_str("\r\n ");
        }
        out.push_str(&remaining[..split]);
        remaining = &remaining[split..];
        first = false;
    }

    out
}

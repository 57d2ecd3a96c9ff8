//! Conversion of the LaTeX math used in labels to plain unicode text.
//!
//! Only the constructs produced by this crate are supported:
//! superscripts, subscripts, `\times`, `\ln` and a few spacing commands.
//! Text outside of `$...$` is kept as is.

/// Convert `text` to plain unicode
pub fn to_plain(text: &str) -> String {
    let mut res = String::with_capacity(text.len());
    for (i, part) in text.split('$').enumerate() {
        if i % 2 == 0 {
            res.push_str(part);
        } else {
            math_to_plain(part, &mut res);
        }
    }
    res
}

fn math_to_plain(math: &str, res: &mut String) {
    let mut chars = math.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '^' | '_' => {
                let group = take_group(&mut chars);
                let map = if c == '^' { superscript } else { subscript };
                let mut plain = String::new();
                math_to_plain(&group, &mut plain);
                res.extend(plain.chars().map(|c| map(c).unwrap_or(c)));
            }
            '\\' => {
                let mut cmd = String::new();
                while let Some(&c) = chars.peek() {
                    if !c.is_ascii_alphabetic() {
                        break;
                    }
                    cmd.push(c);
                    chars.next();
                }
                if cmd.is_empty() {
                    // escaped symbol or spacing such as `\,`
                    match chars.next() {
                        Some(',') | Some(';') | Some(' ') => res.push(' '),
                        Some(c) => res.push(c),
                        None => (),
                    }
                    continue;
                }
                match cmd.as_str() {
                    "times" => res.push('×'),
                    "cdot" => res.push('·'),
                    "pm" => res.push('±'),
                    "infty" => res.push('∞'),
                    "quad" => res.push(' '),
                    "mathrm" | "text" | "mathit" | "mathbf" => (),
                    other => res.push_str(other),
                }
            }
            '{' | '}' => (),
            c => res.push(c),
        }
    }
}

/// Take a `{...}` group, or a single character
fn take_group<I>(chars: &mut std::iter::Peekable<I>) -> String
where
    I: Iterator<Item = char>,
{
    if chars.peek() != Some(&'{') {
        return chars.next().map(String::from).unwrap_or_default();
    }
    chars.next();
    let mut depth = 1;
    let mut group = String::new();
    for c in chars.by_ref() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => (),
        }
        group.push(c);
    }
    group
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '-' | '−' => '⁻',
        '+' => '⁺',
        'n' => 'ⁿ',
        'x' => 'ˣ',
        _ => return None,
    })
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '-' => '₋',
        '+' => '₊',
        _ => return None,
    })
}

//! printf-style template formatting
//!
//! Templates use `%` directives: `%[flags][width][.precision]verb`, with
//! optional 1-based argument indexes (`%[2]s`) and `*` for width or
//! precision taken from the argument list. Formatting never fails; problems
//! are rendered inline so a broken translation stays visible:
//!
//! | Problem | Output |
//! |---------|--------|
//! | Argument missing | `%!s(MISSING)` |
//! | Verb does not fit the argument | `%!d(string=abc)` |
//! | Trailing `%` | `%!(NOVERB)` |
//! | Explicit index out of range | `%!s(BADINDEX)` |
//! | Unused arguments | `%!(EXTRA string=a, int=1)` |
//! | `*` width not an int, or beyond ±1e6 | `%!(BADWIDTH)` |
//! | `*` precision not an int, negative, or above 1e6 | `%!(BADPREC)` |

use std::fmt::{self, Write as _};

/// Upper bound for width and precision
const MAX_COUNT: usize = 1_000_000;

/// A value substituted into a template
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl FormatArg {
    /// Type name used in inline error markers
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float64",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
        }
    }

    fn as_count(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Uint(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }
}

/// The `%v` rendering of the argument
impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(v) => f.write_str(&float_body(*v, 'v', None)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

macro_rules! impl_from_lossless {
    ($variant:ident($target:ty): $($source:ty),+) => {
        $(
            impl From<$source> for FormatArg {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from_lossless!(Int(i64): i8, i16, i32, i64);
impl_from_lossless!(Uint(u64): u8, u16, u32, u64);
impl_from_lossless!(Float(f64): f32, f64);

impl From<isize> for FormatArg {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for FormatArg {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<bool> for FormatArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

/// Build a `Vec<FormatArg>` from heterogeneous values
///
/// ```
/// use resbundle::{bundle_args, printf::sprintf};
///
/// let args = bundle_args!["Ada", 3, 2.5];
/// assert_eq!(sprintf("%s has %d cats (%.1f kg)", &args), "Ada has 3 cats (2.5 kg)");
/// ```
#[macro_export]
macro_rules! bundle_args {
    () => {
        ::std::vec::Vec::<$crate::FormatArg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::FormatArg::from($arg)),+]
    };
}

#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

enum ArgIndex {
    Absent,
    Valid(usize),
    Invalid,
}

/// Substitute `args` into `template`
pub fn sprintf(template: &str, args: &[FormatArg]) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len() + 16);
    let mut cursor = 0;
    let mut arg_num = 0;
    let mut reordered = false;

    while cursor < chars.len() {
        let c = chars[cursor];
        cursor += 1;
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut directive = Directive::default();
        while let Some(&flag) = chars.get(cursor) {
            match flag {
                '-' => {
                    directive.minus = true;
                    directive.zero = false;
                }
                '+' => directive.plus = true,
                '#' => directive.sharp = true,
                '0' => directive.zero = !directive.minus,
                ' ' => directive.space = true,
                _ => break,
            }
            cursor += 1;
        }

        let mut good_index = true;
        let mut take_index = |cursor: &mut usize, arg_num: &mut usize| {
            match parse_arg_index(&chars, cursor, args.len()) {
                ArgIndex::Absent => {}
                ArgIndex::Valid(index) => {
                    *arg_num = index;
                    reordered = true;
                }
                ArgIndex::Invalid => {
                    good_index = false;
                    reordered = true;
                }
            }
        };

        take_index(&mut cursor, &mut arg_num);

        if chars.get(cursor) == Some(&'*') {
            cursor += 1;
            match args.get(arg_num).and_then(FormatArg::as_count).and_then(count_in_range) {
                Some(n) => {
                    if n < 0 {
                        directive.minus = true;
                        directive.zero = false;
                    }
                    directive.width = usize::try_from(n.unsigned_abs()).ok();
                }
                None => out.push_str("%!(BADWIDTH)"),
            }
            if arg_num < args.len() {
                arg_num += 1;
            }
        } else {
            directive.width = parse_count(&chars, &mut cursor);
        }

        if chars.get(cursor) == Some(&'.') {
            cursor += 1;
            take_index(&mut cursor, &mut arg_num);
            if chars.get(cursor) == Some(&'*') {
                cursor += 1;
                let count = args.get(arg_num).and_then(FormatArg::as_count).and_then(count_in_range);
                match count.and_then(|n| usize::try_from(n).ok()) {
                    Some(n) => directive.precision = Some(n),
                    None => out.push_str("%!(BADPREC)"),
                }
                if arg_num < args.len() {
                    arg_num += 1;
                }
            } else {
                directive.precision = Some(parse_count(&chars, &mut cursor).unwrap_or(0));
            }
        }

        take_index(&mut cursor, &mut arg_num);

        let Some(&verb) = chars.get(cursor) else {
            out.push_str("%!(NOVERB)");
            break;
        };
        cursor += 1;

        if verb == '%' {
            out.push('%');
        } else if !good_index {
            let _ = write!(out, "%!{verb}(BADINDEX)");
        } else if let Some(arg) = args.get(arg_num) {
            arg_num += 1;
            format_arg(&mut out, verb, &directive, arg);
        } else {
            let _ = write!(out, "%!{verb}(MISSING)");
        }
    }

    if !reordered && arg_num < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[arg_num..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}={}", arg.type_name(), arg);
        }
        out.push(')');
    }

    out
}

fn parse_arg_index(chars: &[char], cursor: &mut usize, arg_count: usize) -> ArgIndex {
    if chars.get(*cursor) != Some(&'[') {
        return ArgIndex::Absent;
    }
    let Some(close) = chars[*cursor..].iter().position(|&c| c == ']') else {
        *cursor += 1;
        return ArgIndex::Invalid;
    };
    let digits: String = chars[*cursor + 1..*cursor + close].iter().collect();
    *cursor += close + 1;
    match digits.parse::<usize>() {
        Ok(n) if (1..=arg_count).contains(&n) => ArgIndex::Valid(n - 1),
        _ => ArgIndex::Invalid,
    }
}

fn parse_count(chars: &[char], cursor: &mut usize) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.get(*cursor).and_then(|c| c.to_digit(10)) {
        let next = value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize);
        value = Some(next.min(MAX_COUNT));
        *cursor += 1;
    }
    value
}

/// A `*` count beyond `MAX_COUNT` either way is rejected, not clamped
fn count_in_range(n: i64) -> Option<i64> {
    (n.unsigned_abs() <= MAX_COUNT as u64).then_some(n)
}

fn format_arg(out: &mut String, verb: char, directive: &Directive, arg: &FormatArg) {
    match (arg, verb) {
        (FormatArg::Str(s), 's' | 'v') => pad(out, truncate(s, directive.precision), directive),
        (FormatArg::Str(s), 'q') => {
            pad(out, &quote(truncate(s, directive.precision), '"'), directive);
        }
        (FormatArg::Str(s), 'x' | 'X') => {
            let hex: String = s
                .bytes()
                .map(|b| if verb == 'X' { format!("{b:02X}") } else { format!("{b:02x}") })
                .collect();
            pad(out, &hex, directive);
        }
        (FormatArg::Int(n), 'd' | 'v' | 'b' | 'o' | 'x' | 'X') => {
            format_integer(out, *n < 0, n.unsigned_abs(), verb, directive);
        }
        (FormatArg::Uint(n), 'd' | 'v' | 'b' | 'o' | 'x' | 'X') => {
            format_integer(out, false, *n, verb, directive);
        }
        (FormatArg::Int(_) | FormatArg::Uint(_), 'c' | 'q' | 'U') => {
            let code = arg.as_count().and_then(|n| u32::try_from(n).ok());
            let c = code.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER);
            format_char(out, c, verb, directive);
        }
        (FormatArg::Float(v), 'v' | 'g' | 'G' | 'e' | 'E' | 'f' | 'F') => {
            format_float(out, *v, verb, directive);
        }
        (FormatArg::Bool(b), 't' | 'v') => pad(out, if *b { "true" } else { "false" }, directive),
        (FormatArg::Char(c), 'c' | 'v' | 's' | 'q' | 'U') => format_char(out, *c, verb, directive),
        (FormatArg::Char(c), 'd' | 'b' | 'o' | 'x' | 'X') => {
            format_integer(out, false, u64::from(u32::from(*c)), verb, directive);
        }
        _ => {
            let _ = write!(out, "%!{verb}({}={})", arg.type_name(), arg);
        }
    }
}

fn truncate(s: &str, precision: Option<usize>) -> &str {
    match precision.and_then(|p| s.char_indices().nth(p)) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Quote `s` between `delim`. Control characters without a short escape
/// become `\xNN` (ASCII), `\uNNNN` or `\UNNNNNNNN`
fn quote(s: &str, delim: char) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push(delim);
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            c if c == delim => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\u{7}' => quoted.push_str("\\a"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{c}' => quoted.push_str("\\f"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{b}' => quoted.push_str("\\v"),
            c if c.is_control() => {
                let code = u32::from(c);
                let _ = match code {
                    0..=0x7f => write!(quoted, "\\x{code:02x}"),
                    0x80..=0xffff => write!(quoted, "\\u{code:04x}"),
                    _ => write!(quoted, "\\U{code:08x}"),
                };
            }
            c => quoted.push(c),
        }
    }
    quoted.push(delim);
    quoted
}

fn format_char(out: &mut String, c: char, verb: char, directive: &Directive) {
    match verb {
        'q' => pad(out, &quote(c.encode_utf8(&mut [0; 4]), '\''), directive),
        'U' => pad(out, &format!("U+{:04X}", u32::from(c)), directive),
        _ => pad(out, c.encode_utf8(&mut [0; 4]), directive),
    }
}

fn sign_prefix(negative: bool, directive: &Directive) -> &'static str {
    if negative {
        "-"
    } else if directive.plus {
        "+"
    } else if directive.space {
        " "
    } else {
        ""
    }
}

fn format_integer(out: &mut String, negative: bool, magnitude: u64, verb: char, directive: &Directive) {
    let mut digits = match verb {
        'b' => format!("{magnitude:b}"),
        'o' => format!("{magnitude:o}"),
        'x' => format!("{magnitude:x}"),
        'X' => format!("{magnitude:X}"),
        _ => magnitude.to_string(),
    };
    if let Some(precision) = directive.precision {
        if precision == 0 && magnitude == 0 {
            digits.clear();
        } else if digits.len() < precision {
            digits.insert_str(0, &"0".repeat(precision - digits.len()));
        }
    }

    let mut prefix = sign_prefix(negative, directive).to_string();
    if directive.sharp {
        match verb {
            'b' => prefix.push_str("0b"),
            'o' if !digits.starts_with('0') => prefix.push('0'),
            'x' => prefix.push_str("0x"),
            'X' => prefix.push_str("0X"),
            _ => {}
        }
    }

    let zero_pad = directive.zero && directive.precision.is_none();
    pad_number(out, &prefix, &digits, directive, zero_pad);
}

fn format_float(out: &mut String, v: f64, verb: char, directive: &Directive) {
    if v.is_nan() {
        pad_number(out, "", "NaN", directive, false);
        return;
    }
    if v.is_infinite() {
        pad_number(out, "", if v > 0.0 { "+Inf" } else { "-Inf" }, directive, false);
        return;
    }
    let body = float_body(v.abs(), verb, directive.precision);
    let prefix = sign_prefix(v.is_sign_negative(), directive);
    pad_number(out, prefix, &body, directive, directive.zero);
}

/// Unsigned rendering of a finite float for the given verb
fn float_body(v: f64, verb: char, precision: Option<usize>) -> String {
    if !v.is_finite() {
        return if v.is_nan() {
            "NaN".to_string()
        } else if v > 0.0 {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    match verb {
        'f' | 'F' => format!("{:.*}", precision.unwrap_or(6), v),
        'e' | 'E' => exponent_form(&format!("{:.*e}", precision.unwrap_or(6), v), verb == 'E'),
        _ => general_form(v, precision, verb == 'G'),
    }
}

/// `%g`: exponent form for large or tiny exponents, plain decimal otherwise
fn general_form(v: f64, precision: Option<usize>, upper: bool) -> String {
    match precision {
        None => {
            let shortest = format!("{v:e}");
            let exponent = exponent_of(&shortest);
            if !(-4..6).contains(&exponent) {
                exponent_form(&shortest, upper)
            } else {
                format!("{v}")
            }
        }
        Some(precision) => {
            let significant = precision.max(1);
            let rounded = format!("{:.*e}", significant - 1, v);
            let exponent = exponent_of(&rounded);
            let limit = i32::try_from(significant).unwrap_or(i32::MAX);
            if exponent < -4 || exponent >= limit {
                let mantissa = rounded.split_once('e').map_or(rounded.as_str(), |(m, _)| m);
                exponent_form(&format!("{}e{exponent}", trim_fraction(mantissa)), upper)
            } else {
                let decimals = usize::try_from(limit - 1 - exponent).unwrap_or(0);
                trim_fraction(&format!("{v:.decimals$}")).to_string()
            }
        }
    }
}

fn exponent_of(scientific: &str) -> i32 {
    scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

/// Rewrite Rust's `1.5e3` as `1.5e+03`
fn exponent_form(scientific: &str, upper: bool) -> String {
    let (mantissa, _) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let exponent = exponent_of(scientific);
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{sign}{:02}", exponent.unsigned_abs())
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

fn pad(out: &mut String, body: &str, directive: &Directive) {
    pad_number(out, "", body, directive, directive.zero);
}

fn pad_number(out: &mut String, prefix: &str, body: &str, directive: &Directive, zero_pad: bool) {
    let len = prefix.chars().count() + body.chars().count();
    let fill = directive.width.unwrap_or(0).saturating_sub(len);
    if directive.minus {
        out.push_str(prefix);
        out.push_str(body);
        out.extend(std::iter::repeat(' ').take(fill));
    } else if zero_pad {
        out.push_str(prefix);
        out.extend(std::iter::repeat('0').take(fill));
        out.push_str(body);
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(prefix);
        out.push_str(body);
    }
}

use winnow::combinator::{alt, delimited, preceded, repeat};
use winnow::error::ErrMode;
use winnow::token::{any, literal, none_of, one_of};
use winnow::{ModalResult, Parser};

use crate::types::{AffixPart, DecimalSymbols};

/// The special characters the grammar is interpreted with. Invariant for
/// plain patterns, taken from the symbol table for localized ones. The
/// currency sign and the quote are never localized.
#[derive(Debug, Clone)]
pub(crate) struct PatternChars {
    pub zero: char,
    pub digit: char,
    pub group: char,
    pub decimal: char,
    pub percent: char,
    pub per_mille: char,
    pub separator: char,
    pub minus: char,
    pub plus: char,
    pub pad: char,
    pub exponent: String,
}

impl PatternChars {
    pub fn invariant() -> Self {
        PatternChars {
            zero: '0',
            digit: '#',
            group: ',',
            decimal: '.',
            percent: '%',
            per_mille: '‰',
            separator: ';',
            minus: '-',
            plus: '+',
            pad: '*',
            exponent: "E".to_string(),
        }
    }

    pub fn localized(symbols: &DecimalSymbols) -> Self {
        PatternChars {
            zero: symbols.zero_digit,
            digit: symbols.digit,
            group: symbols.grouping_separator,
            decimal: symbols.decimal_separator,
            percent: symbols.percent,
            per_mille: symbols.per_mille,
            separator: symbols.pattern_separator,
            minus: symbols.minus_sign,
            plus: symbols.plus_sign,
            pad: symbols.pad_escape,
            exponent: symbols.exponent_separator.clone(),
        }
    }
}

/// One token of the numeric portion of a sub-pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum CoreToken {
    Zero,
    Digit,
    Group,
    Decimal,
}

/// Quoted literal text; a doubled quote inside is one literal quote
pub(super) fn quoted_literal(input: &mut &str) -> ModalResult<String> {
    let content = repeat(0.., alt((literal("''").value('\''), none_of(['\'']))))
        .map(|cs: Vec<char>| cs.into_iter().collect::<String>());
    delimited('\'', content, '\'')
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
}

/// A single affix token. Everything that is not reserved passes through as a
/// literal character.
pub(super) fn affix_part(chars: &PatternChars) -> impl FnMut(&mut &str) -> ModalResult<AffixPart> {
    let zero = chars.zero;
    let digit = chars.digit;
    let group = chars.group;
    let decimal = chars.decimal;
    let separator = chars.separator;
    let pad = chars.pad;
    let percent = chars.percent;
    let per_mille = chars.per_mille;
    let minus = chars.minus;
    let plus = chars.plus;
    let reserved = move |c: char| {
        c == zero
            || c == digit
            || c == group
            || c == decimal
            || c == separator
            || c == pad
            || c == '¤'
            || c == '\''
    };
    move |input: &mut &str| {
        alt((
            literal("¤¤").value(AffixPart::CurrencyIso),
            literal("¤").value(AffixPart::CurrencySymbol),
            literal("''").value(AffixPart::Literal("'".to_string())),
            quoted_literal.map(AffixPart::Literal),
            one_of(move |c: char| c == percent).value(AffixPart::Percent),
            one_of(move |c: char| c == per_mille).value(AffixPart::PerMille),
            one_of(move |c: char| c == minus).value(AffixPart::MinusSign),
            one_of(move |c: char| c == plus).value(AffixPart::PlusSign),
            one_of(move |c: char| !reserved(c)).map(|c: char| AffixPart::Literal(c.to_string())),
        ))
        .parse_next(input)
    }
}

pub(super) fn core_token(chars: &PatternChars) -> impl FnMut(&mut &str) -> ModalResult<CoreToken> {
    let zero = chars.zero;
    let digit = chars.digit;
    let group = chars.group;
    let decimal = chars.decimal;
    move |input: &mut &str| {
        alt((
            one_of(move |c: char| c == zero).value(CoreToken::Zero),
            one_of(move |c: char| c == digit).value(CoreToken::Digit),
            one_of(move |c: char| c == group).value(CoreToken::Group),
            one_of(move |c: char| c == decimal).value(CoreToken::Decimal),
        ))
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
    }
}

/// Exponent clause: separator, optional forced sign, minimum digit count
pub(super) fn exponent_spec<'a>(
    chars: &'a PatternChars,
) -> impl FnMut(&mut &str) -> ModalResult<(u8, bool)> + 'a {
    let plus = chars.plus;
    let zero = chars.zero;
    move |input: &mut &str| {
        let _ = literal(chars.exponent.as_str())
            .parse_next(input)
            .map_err(ErrMode::Backtrack)?;
        let signed: Option<char> = winnow::combinator::opt(one_of(move |c: char| c == plus))
            .parse_next(input)?;
        let zeros: Vec<char> = repeat(1.., one_of(move |c: char| c == zero)).parse_next(input)?;
        Ok((zeros.len().min(255) as u8, signed.is_some()))
    }
}

/// Pad specification: the pad escape followed by the pad character
pub(super) fn pad_spec(chars: &PatternChars) -> impl FnMut(&mut &str) -> ModalResult<char> {
    let pad = chars.pad;
    move |input: &mut &str| {
        preceded(one_of(move |c: char| c == pad), any)
            .parse_next(input)
            .map_err(ErrMode::Backtrack)
    }
}

use crate::core::attribute_schema::AttributeSchema;
use crate::core::attributes::{Attribute, AttributeKind};
use crate::core::instances::{Field, Row};
use crate::utils::file_parsing::{
    is_comment_or_empty, split_csv_preserving_quotes, strip_surrounding_quotes,
};
use std::collections::BTreeMap;
use std::io::{BufRead, Error, ErrorKind};

#[derive(Debug, Clone, PartialEq)]
pub(super) enum ArffType {
    Numeric,
    Nominal(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct ArffAttribute {
    pub name: String,
    pub ty: ArffType,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct ArffHeader {
    pub relation: String,
    pub attributes: Vec<ArffAttribute>,
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::new(ErrorKind::InvalidData, msg.into())
}

fn eof_before_data() -> Error {
    Error::new(ErrorKind::UnexpectedEof, "ARFF file ended before @data")
}

fn starts_with_directive(line: &str, directive: &str) -> bool {
    line.trim_start()
        .get(..directive.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(directive))
}

/// Reads up to and including the `@data` line. `@relation` is optional; the
/// first `@attribute` may appear without it.
pub(super) fn parse_header<R: BufRead>(reader: &mut R) -> Result<ArffHeader, Error> {
    let mut relation: Option<String> = None;
    let mut attributes = Vec::new();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(eof_before_data());
        }
        if is_comment_or_empty(&line, '%') {
            continue;
        }

        if starts_with_directive(&line, "@relation") {
            if relation.is_some() || !attributes.is_empty() {
                return Err(invalid("@relation must come first and only once"));
            }
            let raw = line.trim()["@relation".len()..].trim();
            relation = Some(strip_surrounding_quotes(raw).to_string());
        } else if starts_with_directive(&line, "@attribute") {
            attributes.push(parse_attribute_line(&line)?);
        } else if starts_with_directive(&line, "@data") {
            break;
        } else {
            return Err(invalid(format!(
                "Unsupported header directive: {}",
                line.trim()
            )));
        }
    }

    Ok(ArffHeader {
        relation: relation.unwrap_or_else(|| "unnamed_relation".to_string()),
        attributes,
    })
}

pub(super) fn parse_attribute_line(line: &str) -> Result<ArffAttribute, Error> {
    if !starts_with_directive(line, "@attribute") {
        return Err(invalid("Line is not '@attribute'"));
    }
    let rest = line.trim()["@attribute".len()..].trim();

    let (name, after_name) = match rest.chars().next() {
        Some(q @ ('\'' | '"')) => {
            let end = rest[1..]
                .find(q)
                .map(|i| i + 1)
                .ok_or_else(|| invalid("Attribute name without closing quote marks"))?;
            (rest[1..end].to_string(), rest[end + 1..].trim())
        }
        Some(_) => {
            let (name, after) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| invalid("Attribute type is missing"))?;
            (name.to_string(), after.trim())
        }
        None => return Err(invalid("Attribute name is missing")),
    };

    if let Some(inside) = after_name.strip_prefix('{') {
        let close = inside
            .rfind('}')
            .ok_or_else(|| invalid("Nominal set without closing '}'"))?;
        let values: Vec<String> = inside[..close]
            .split(',')
            .map(|s| strip_surrounding_quotes(s).to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if values.is_empty() {
            return Err(invalid("Empty nominal domain"));
        }
        return Ok(ArffAttribute {
            name,
            ty: ArffType::Nominal(values),
        });
    }

    let type_word = after_name.split_whitespace().next().unwrap_or_default();
    match type_word.parse::<AttributeKind>() {
        Ok(AttributeKind::Numeric) => Ok(ArffAttribute {
            name,
            ty: ArffType::Numeric,
        }),
        _ => Err(invalid(format!("Attribute kind not supported: {after_name}"))),
    }
}

/// The class attribute moves to column 0; the rest keep their file order.
pub(super) fn build_schema(header: &ArffHeader, class_index: usize) -> Result<AttributeSchema, Error> {
    let class = header.attributes.get(class_index).ok_or_else(|| {
        invalid(format!(
            "class index {class_index} is out of range for {} attributes",
            header.attributes.len()
        ))
    })?;
    let ArffType::Nominal(class_names) = &class.ty else {
        return Err(invalid(format!(
            "class attribute '{}' must be nominal",
            class.name
        )));
    };

    let columns: BTreeMap<usize, Attribute> = header
        .attributes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != class_index)
        .enumerate()
        .map(|(column, (_, a))| {
            let kind = match a.ty {
                ArffType::Numeric => AttributeKind::Numeric,
                ArffType::Nominal(_) => AttributeKind::Categorical,
            };
            (column + 1, Attribute::new(a.name.clone(), kind))
        })
        .collect();

    Ok(AttributeSchema::new(header.relation.clone(), class_names.len(), columns)
        .with_class_names(class_names.clone()))
}

pub(super) fn parse_data_line(
    header: &ArffHeader,
    class_index: usize,
    line: &str,
    row: usize,
) -> Result<Row, Error> {
    let tokens = split_csv_preserving_quotes(line);
    if tokens.len() != header.attributes.len() {
        return Err(invalid(format!(
            "Number of columns ({}) differs from number of attributes ({})",
            tokens.len(),
            header.attributes.len()
        )));
    }

    let mut label = None;
    let mut fields = Vec::with_capacity(tokens.len().saturating_sub(1));
    for (idx, (raw, attr)) in tokens.iter().zip(&header.attributes).enumerate() {
        let raw = strip_surrounding_quotes(raw);
        let column = fields.len() + 1;

        match &attr.ty {
            ArffType::Nominal(domain) => {
                let Some(pos) = domain.iter().position(|v| v == raw) else {
                    return Err(invalid(format!(
                        "Nominal value '{raw}' not found in domain of attribute '{}'",
                        attr.name
                    )));
                };
                if idx == class_index {
                    label = Some(pos);
                } else {
                    fields.push(Field::Categorical(raw.to_string()));
                }
            }
            ArffType::Numeric => {
                let field = Field::parse(raw, AttributeKind::Numeric, row, column)
                    .map_err(|e| invalid(e.to_string()))?;
                fields.push(field);
            }
        }
    }

    let label = label.ok_or_else(|| invalid("row has no class value"))?;
    Ok(Row::new(label, fields))
}

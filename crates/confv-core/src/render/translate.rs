// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Go `text/template` front end.
//!
//! [`translate`] rewrites a Go template into minijinja source. Supported:
//!
//! - field chains on dot (`.values.port`), `.`, `$`, `$var.field`
//! - `if` / `else if` / `else`, `range` (with `$k, $v :=`), `with`, `end`
//! - variable declaration and assignment actions
//! - pipelines, parenthesized pipelines and `{{- -}}` trim markers
//! - `{{/* */}}` comments
//! - `index`, `len`, `not`, `and`, `or`, `eq`, `ne`, `lt`, `le`, `gt`, `ge`,
//!   `print`, `println`, `printf`, `b64enc`, `b64dec`, `required`
//!
//! Literal text is emitted as a string expression whenever it holds a `{`, so
//! Jinja-looking text is never interpreted.

use minijinja::{Error, ErrorKind};

const SPACE: &[char] = &[' ', '\t', '\r', '\n'];

pub fn translate(template: &str) -> Result<String, Error> {
	let mut pieces = split_actions(template)?;
	apply_trim_markers(&mut pieces);

	let mut translator = Translator::default();
	for piece in &pieces {
		match piece {
			Piece::Text(text) => translator.text(text),
			Piece::Comment { .. } => {}
			Piece::Action { body, .. } => translator.action(body)?,
		}
	}
	translator.finish()
}

fn syntax(message: impl Into<String>) -> Error {
	Error::new(ErrorKind::SyntaxError, message.into())
}

enum Piece<'a> {
	Text(&'a str),
	Action {
		body: &'a str,
		trim_left: bool,
		trim_right: bool,
	},
	Comment {
		trim_left: bool,
		trim_right: bool,
	},
}

impl Piece<'_> {
	fn trims(&self) -> (bool, bool) {
		match self {
			Piece::Text(_) => (false, false),
			Piece::Action {
				trim_left,
				trim_right,
				..
			}
			| Piece::Comment {
				trim_left,
				trim_right,
			} => (*trim_left, *trim_right),
		}
	}
}

fn split_actions(template: &str) -> Result<Vec<Piece<'_>>, Error> {
	let mut pieces = Vec::new();
	let mut rest = template;

	while let Some(open) = rest.find("{{") {
		if open > 0 {
			pieces.push(Piece::Text(&rest[..open]));
		}
		let mut inner = &rest[open + 2..];
		let trim_left = inner.starts_with('-') && inner[1..].starts_with(SPACE);
		if trim_left {
			inner = &inner[1..];
		}

		let comment = if trim_left { &inner[1..] } else { inner };
		if let Some(body) = comment.strip_prefix("/*") {
			let end = body.find("*/").ok_or_else(|| syntax("unclosed comment"))?;
			let after = &body[end + 2..];
			let trim_right = after.starts_with(SPACE) && after[1..].starts_with("-}}");
			rest = if trim_right {
				&after[4..]
			} else if let Some(after) = after.strip_prefix("}}") {
				after
			} else {
				return Err(syntax("comment ends before closing delimiter"));
			};
			pieces.push(Piece::Comment {
				trim_left,
				trim_right,
			});
			continue;
		}

		let close = find_close(inner).ok_or_else(|| syntax("unclosed action"))?;
		let mut body = &inner[..close];
		let trim_right = body.ends_with('-') && body[..body.len() - 1].ends_with(SPACE);
		if trim_right {
			body = &body[..body.len() - 1];
		}
		pieces.push(Piece::Action {
			body,
			trim_left,
			trim_right,
		});
		rest = &inner[close + 2..];
	}

	if !rest.is_empty() {
		pieces.push(Piece::Text(rest));
	}
	Ok(pieces)
}

/// Byte offset of the `}}` closing an action, skipping quoted text.
fn find_close(s: &str) -> Option<usize> {
	let mut quote: Option<char> = None;
	let mut escaped = false;
	for (i, ch) in s.char_indices() {
		match quote {
			Some('`') => {
				if ch == '`' {
					quote = None;
				}
			}
			Some(q) => {
				if escaped {
					escaped = false;
				} else if ch == '\\' {
					escaped = true;
				} else if ch == q {
					quote = None;
				}
			}
			None if matches!(ch, '"' | '\'' | '`') => quote = Some(ch),
			None if s[i..].starts_with("}}") => return Some(i),
			None => {}
		}
	}
	None
}

fn apply_trim_markers(pieces: &mut [Piece<'_>]) {
	for i in 0..pieces.len() {
		let (left, right) = pieces[i].trims();
		if left && i > 0 {
			if let Piece::Text(text) = &mut pieces[i - 1] {
				let current: &str = *text;
				*text = current.trim_end_matches(SPACE);
			}
		}
		if right {
			if let Some(Piece::Text(text)) = pieces.get_mut(i + 1) {
				let current: &str = *text;
				*text = current.trim_start_matches(SPACE);
			}
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
	If,
	Range,
	With,
}

#[derive(Debug)]
struct Block {
	kind: BlockKind,
	binds_dot: bool,
	in_else: bool,
}

#[derive(Default)]
struct Translator {
	out: String,
	blocks: Vec<Block>,
	dots: Vec<String>,
	next_id: usize,
}

struct Pipeline {
	vars: Vec<String>,
	expr: String,
}

impl Translator {
	fn text(&mut self, text: &str) {
		if text.is_empty() {
			return;
		}
		if text.contains('{') {
			self.out.push_str("{{ ");
			self.out.push_str(&quote(text));
			self.out.push_str(" }}");
		} else {
			self.out.push_str(text);
		}
	}

	fn action(&mut self, body: &str) -> Result<(), Error> {
		let body = body.trim_matches(SPACE);
		let keyword_len = body
			.find(|c: char| !is_ident_char(c))
			.unwrap_or(body.len());
		let (keyword, rest) = body.split_at(keyword_len);

		match keyword {
			"if" => {
				let pipeline = self.compile(rest)?;
				let cond = self.bind(pipeline)?;
				self.out.push_str(&format!("{{% if {cond} %}}"));
				self.open(BlockKind::If, false);
			}
			"else" => self.else_branch(rest.trim_start_matches(SPACE))?,
			"end" => {
				if !rest.trim_matches(SPACE).is_empty() {
					return Err(syntax("unexpected content after end"));
				}
				self.end()?;
			}
			"range" => {
				let pipeline = self.compile(rest)?;
				let id = self.fresh_id();
				let dot = format!("dot_{id}");
				let key = match pipeline.vars.as_slice() {
					[key, _] => var_name(key),
					_ => format!("key_{id}"),
				};
				self.out.push_str(&format!(
					"{{% for {key}, {dot} in ({}) | entries %}}",
					pipeline.expr
				));
				if let Some(value) = pipeline.vars.last() {
					self.out
						.push_str(&format!("{{% set {} = {dot} %}}", var_name(value)));
				}
				self.dots.push(dot);
				self.open(BlockKind::Range, true);
			}
			"with" => {
				let pipeline = self.compile(rest)?;
				let dot = format!("dot_{}", self.fresh_id());
				self.out
					.push_str(&format!("{{% with {dot} = {} %}}", pipeline.expr));
				match pipeline.vars.as_slice() {
					[] => {}
					[var] => self
						.out
						.push_str(&format!("{{% set {} = {dot} %}}", var_name(var))),
					_ => return Err(syntax("too many declarations in with")),
				}
				self.out.push_str(&format!("{{% if {dot} %}}"));
				self.dots.push(dot);
				self.open(BlockKind::With, true);
			}
			"define" | "template" | "block" | "break" | "continue" => {
				return Err(syntax(format!("{{{{{keyword}}}}} is not supported")));
			}
			_ => {
				let pipeline = self.compile(body)?;
				match pipeline.vars.as_slice() {
					[] => self.out.push_str(&format!("{{{{ {} }}}}", pipeline.expr)),
					[var] => self.out.push_str(&format!(
						"{{% set {} = {} %}}",
						var_name(var),
						pipeline.expr
					)),
					_ => return Err(syntax("too many declarations")),
				}
			}
		}
		Ok(())
	}

	fn else_branch(&mut self, rest: &str) -> Result<(), Error> {
		let Some(block) = self.blocks.last() else {
			return Err(syntax("unexpected {{else}}"));
		};
		if block.in_else {
			return Err(syntax("{{else}} after {{else}}"));
		}
		let kind = block.kind;

		if rest.is_empty() {
			if self.blocks.last().is_some_and(|b| b.binds_dot) {
				self.dots.pop();
			}
			if let Some(block) = self.blocks.last_mut() {
				block.in_else = true;
				block.binds_dot = false;
			}
			self.out.push_str("{% else %}");
			return Ok(());
		}

		let condition = rest
			.strip_prefix("if")
			.filter(|c| c.is_empty() || c.starts_with(SPACE));
		match (kind, condition) {
			(BlockKind::If, Some(condition)) => {
				let pipeline = self.compile(condition)?;
				if !pipeline.vars.is_empty() {
					return Err(syntax("declarations are not supported in else if"));
				}
				self.out.push_str(&format!("{{% elif {} %}}", pipeline.expr));
				Ok(())
			}
			_ => Err(syntax(format!("unexpected {{{{else {rest}}}}}"))),
		}
	}

	fn end(&mut self) -> Result<(), Error> {
		let block = self
			.blocks
			.pop()
			.ok_or_else(|| syntax("unexpected {{end}}"))?;
		if block.binds_dot {
			self.dots.pop();
		}
		self.out.push_str(match block.kind {
			BlockKind::If => "{% endif %}",
			BlockKind::Range => "{% endfor %}",
			BlockKind::With => "{% endif %}{% endwith %}",
		});
		Ok(())
	}

	fn finish(self) -> Result<String, Error> {
		match self.blocks.last() {
			None => Ok(self.out),
			Some(block) => Err(syntax(format!(
				"unexpected EOF in {:?} block",
				block.kind
			))),
		}
	}

	fn open(&mut self, kind: BlockKind, binds_dot: bool) {
		self.blocks.push(Block {
			kind,
			binds_dot,
			in_else: false,
		});
	}

	fn fresh_id(&mut self) -> usize {
		self.next_id += 1;
		self.next_id
	}

	/// Emit any declaration and return the expression to test.
	fn bind(&mut self, pipeline: Pipeline) -> Result<String, Error> {
		match pipeline.vars.as_slice() {
			[] => Ok(pipeline.expr),
			[var] => {
				let name = var_name(var);
				self.out
					.push_str(&format!("{{% set {name} = {} %}}", pipeline.expr));
				Ok(name)
			}
			_ => Err(syntax("too many declarations")),
		}
	}

	fn compile(&self, source: &str) -> Result<Pipeline, Error> {
		let tokens = lex(source)?;
		let mut parser = Parser {
			tokens: &tokens,
			pos: 0,
			dot: self.dots.last().map(String::as_str),
		};
		let vars = parser.declarations();
		let expr = parser.pipeline()?;
		if let Some(token) = tokens.get(parser.pos) {
			return Err(syntax(format!("unexpected {token:?} in pipeline")));
		}
		Ok(Pipeline { vars, expr })
	}
}

fn var_name(name: &str) -> String {
	format!("v_{name}")
}

fn is_ident_start(c: char) -> bool {
	c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
	Dot,
	Field(Vec<String>),
	Variable(String, Vec<String>),
	Ident(String),
	Str(String),
	Number(String),
	Open,
	Close(Vec<String>),
	Pipe,
	Comma,
	Declare,
	Assign,
}

fn lex(source: &str) -> Result<Vec<Token>, Error> {
	let chars: Vec<char> = source.chars().collect();
	let mut tokens = Vec::new();
	let mut i = 0;

	while let Some(&c) = chars.get(i) {
		let next = chars.get(i + 1).copied();
		match c {
			c if SPACE.contains(&c) => i += 1,
			'|' => {
				tokens.push(Token::Pipe);
				i += 1;
			}
			',' => {
				tokens.push(Token::Comma);
				i += 1;
			}
			'(' => {
				tokens.push(Token::Open);
				i += 1;
			}
			')' => {
				i += 1;
				tokens.push(Token::Close(fields_at(&chars, &mut i)));
			}
			':' if next == Some('=') => {
				tokens.push(Token::Declare);
				i += 2;
			}
			'=' => {
				tokens.push(Token::Assign);
				i += 1;
			}
			'"' => tokens.push(Token::Str(interpreted_string(&chars, &mut i)?)),
			'`' => tokens.push(Token::Str(raw_string(&chars, &mut i)?)),
			'\'' => return Err(syntax("character constants are not supported")),
			'.' if next.is_some_and(is_ident_start) => {
				tokens.push(Token::Field(fields_at(&chars, &mut i)));
			}
			'.' if next.is_some_and(|n| n.is_ascii_digit()) => {
				tokens.push(Token::Number(number_at(&chars, &mut i)?));
			}
			'.' => {
				tokens.push(Token::Dot);
				i += 1;
			}
			'$' => {
				i += 1;
				let name = ident_at(&chars, &mut i);
				let fields = fields_at(&chars, &mut i);
				tokens.push(Token::Variable(name, fields));
			}
			c if c.is_ascii_digit()
				|| (matches!(c, '-' | '+')
					&& next.is_some_and(|n| n.is_ascii_digit() || n == '.')) =>
			{
				tokens.push(Token::Number(number_at(&chars, &mut i)?));
			}
			c if is_ident_start(c) => tokens.push(Token::Ident(ident_at(&chars, &mut i))),
			other => return Err(syntax(format!("unexpected {other:?} in action"))),
		}
	}

	Ok(tokens)
}

fn ident_at(chars: &[char], i: &mut usize) -> String {
	let start = *i;
	while chars.get(*i).copied().is_some_and(is_ident_char) {
		*i += 1;
	}
	chars[start..*i].iter().collect()
}

fn fields_at(chars: &[char], i: &mut usize) -> Vec<String> {
	let mut fields = Vec::new();
	while chars.get(*i) == Some(&'.') && chars.get(*i + 1).copied().is_some_and(is_ident_start) {
		*i += 1;
		fields.push(ident_at(chars, i));
	}
	fields
}

fn number_at(chars: &[char], i: &mut usize) -> Result<String, Error> {
	let start = *i;
	*i += 1;
	while let Some(&c) = chars.get(*i) {
		let exponent_sign =
			matches!(c, '+' | '-') && matches!(chars[*i - 1], 'e' | 'E' | 'p' | 'P');
		if c.is_ascii_alphanumeric() || matches!(c, '.' | '_') || exponent_sign {
			*i += 1;
		} else {
			break;
		}
	}
	let text: String = chars[start..*i].iter().filter(|c| **c != '_').collect();
	parse_number(&text)
}

/// Canonical minijinja literal for a Go number constant.
fn parse_number(text: &str) -> Result<String, Error> {
	let (negative, unsigned) = match text.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, text.strip_prefix('+').unwrap_or(text)),
	};
	let lower = unsigned.to_ascii_lowercase();
	let (radix, digits) = if let Some(d) = lower.strip_prefix("0x") {
		(16, d)
	} else if let Some(d) = lower.strip_prefix("0o") {
		(8, d)
	} else if let Some(d) = lower.strip_prefix("0b") {
		(2, d)
	} else if lower.len() > 1 && lower.starts_with('0') && lower.chars().all(|c| c.is_ascii_digit()) {
		(8, &lower[1..])
	} else {
		(10, lower.as_str())
	};

	if let Ok(n) = i64::from_str_radix(digits, radix) {
		return Ok(if negative { format!("-{n}") } else { n.to_string() });
	}
	if radix == 10 {
		if let Ok(f) = digits.parse::<f64>() {
			if f.is_finite() {
				return Ok(format!("{:?}", if negative { -f } else { f }));
			}
		}
	}
	Err(syntax(format!("bad number syntax: {text:?}")))
}

fn interpreted_string(chars: &[char], i: &mut usize) -> Result<String, Error> {
	let unterminated = || syntax("unterminated quoted string");
	let mut out = String::new();
	*i += 1;
	loop {
		let c = *chars.get(*i).ok_or_else(unterminated)?;
		*i += 1;
		match c {
			'"' => return Ok(out),
			'\n' => return Err(unterminated()),
			'\\' => {
				let escape = *chars.get(*i).ok_or_else(unterminated)?;
				*i += 1;
				let decoded = match escape {
					'a' => '\u{07}',
					'b' => '\u{08}',
					'f' => '\u{0c}',
					'n' => '\n',
					'r' => '\r',
					't' => '\t',
					'v' => '\u{0b}',
					'\\' | '"' | '\'' => escape,
					'x' => code_point(chars, i, 2, 16)?,
					'u' => code_point(chars, i, 4, 16)?,
					'U' => code_point(chars, i, 8, 16)?,
					'0'..='7' => {
						*i -= 1;
						code_point(chars, i, 3, 8)?
					}
					other => return Err(syntax(format!("unknown escape sequence \\{other}"))),
				};
				out.push(decoded);
			}
			c => out.push(c),
		}
	}
}

fn code_point(chars: &[char], i: &mut usize, len: usize, radix: u32) -> Result<char, Error> {
	let digits: String = chars
		.get(*i..*i + len)
		.ok_or_else(|| syntax("truncated escape sequence"))?
		.iter()
		.collect();
	*i += len;
	u32::from_str_radix(&digits, radix)
		.ok()
		.and_then(char::from_u32)
		.ok_or_else(|| syntax(format!("invalid escape sequence {digits:?}")))
}

fn raw_string(chars: &[char], i: &mut usize) -> Result<String, Error> {
	let start = *i + 1;
	let len = chars[start..]
		.iter()
		.position(|c| *c == '`')
		.ok_or_else(|| syntax("unterminated raw quoted string"))?;
	*i = start + len + 1;
	Ok(chars[start..start + len].iter().collect())
}

/// Double-quoted minijinja string literal.
fn quote(s: &str) -> String {
	let mut out = String::with_capacity(s.len() + 2);
	out.push('"');
	for c in s.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
			c => out.push(c),
		}
	}
	out.push('"');
	out
}

enum Operand {
	Function(String),
	Value(String),
}

struct Parser<'a> {
	tokens: &'a [Token],
	pos: usize,
	/// Current dot; `None` is the root context.
	dot: Option<&'a str>,
}

impl Parser<'_> {
	fn declarations(&mut self) -> Vec<String> {
		match self.tokens {
			[Token::Variable(a, fa), Token::Comma, Token::Variable(b, fb), Token::Declare | Token::Assign, ..]
				if !a.is_empty() && !b.is_empty() && fa.is_empty() && fb.is_empty() =>
			{
				self.pos = 4;
				vec![a.clone(), b.clone()]
			}
			[Token::Variable(a, fa), Token::Declare | Token::Assign, ..]
				if !a.is_empty() && fa.is_empty() =>
			{
				self.pos = 2;
				vec![a.clone()]
			}
			_ => Vec::new(),
		}
	}

	fn pipeline(&mut self) -> Result<String, Error> {
		let mut expr = self.command(None)?;
		while self.tokens.get(self.pos) == Some(&Token::Pipe) {
			self.pos += 1;
			expr = self.command(Some(expr))?;
		}
		Ok(expr)
	}

	fn command(&mut self, piped: Option<String>) -> Result<String, Error> {
		let mut operands = Vec::new();
		while let Some(token) = self.tokens.get(self.pos) {
			if matches!(token, Token::Pipe | Token::Close(_)) {
				break;
			}
			operands.push(self.operand()?);
		}

		let mut operands = operands.into_iter();
		match operands.next() {
			None => Err(syntax("missing value for command")),
			Some(Operand::Function(name)) => {
				let mut args = operands
					.map(|operand| match operand {
						Operand::Value(value) => Ok(value),
						Operand::Function(f) => {
							Err(syntax(format!("function {f:?} used as an argument")))
						}
					})
					.collect::<Result<Vec<_>, _>>()?;
				args.extend(piped);
				call(&name, args)
			}
			Some(Operand::Value(value)) => {
				if operands.next().is_some() || piped.is_some() {
					Err(syntax("can't give argument to non-function"))
				} else {
					Ok(value)
				}
			}
		}
	}

	fn operand(&mut self) -> Result<Operand, Error> {
		let tokens = self.tokens;
		let token = &tokens[self.pos];
		self.pos += 1;

		let value = match token {
			Token::Dot => self
				.dot
				.map(str::to_string)
				.ok_or_else(|| syntax("{{.}} outside range or with is not supported"))?,
			Token::Field(fields) => match self.dot {
				Some(dot) => with_fields(dot.to_string(), fields),
				None => fields.join("."),
			},
			Token::Variable(name, fields) if name.is_empty() => {
				if fields.is_empty() {
					return Err(syntax("$ must be followed by a field"));
				}
				fields.join(".")
			}
			Token::Variable(name, fields) => with_fields(var_name(name), fields),
			Token::Ident(name) => match name.as_str() {
				"true" | "false" => name.clone(),
				"nil" => "none".to_string(),
				_ => return Ok(Operand::Function(name.clone())),
			},
			Token::Str(s) => quote(s),
			Token::Number(n) => n.clone(),
			Token::Open => {
				let inner = self.pipeline()?;
				match tokens.get(self.pos) {
					Some(Token::Close(fields)) => {
						self.pos += 1;
						with_fields(inner, fields)
					}
					_ => return Err(syntax("unclosed left paren")),
				}
			}
			other => return Err(syntax(format!("unexpected {other:?} in operand"))),
		};
		Ok(Operand::Value(value))
	}
}

fn with_fields(base: String, fields: &[String]) -> String {
	fields
		.iter()
		.fold(base, |acc, field| format!("{acc}.{field}"))
}

fn expect_args(name: &str, args: &[String], min: usize, max: Option<usize>) -> Result<(), Error> {
	let ok = args.len() >= min && max.map_or(true, |max| args.len() <= max);
	if ok {
		Ok(())
	} else {
		Err(syntax(format!(
			"wrong number of args for {name}: got {}",
			args.len()
		)))
	}
}

fn call(name: &str, args: Vec<String>) -> Result<String, Error> {
	match name {
		"index" => {
			expect_args(name, &args, 1, None)?;
			Ok(args[1..]
				.iter()
				.fold(format!("({})", args[0]), |acc, key| format!("{acc}[{key}]")))
		}
		"len" => {
			expect_args(name, &args, 1, Some(1))?;
			Ok(format!("({} | length)", args[0]))
		}
		"not" => {
			expect_args(name, &args, 1, Some(1))?;
			Ok(format!("(not {})", args[0]))
		}
		"and" | "or" => {
			expect_args(name, &args, 2, None)?;
			Ok(format!("({})", args.join(&format!(" {name} "))))
		}
		"eq" => {
			expect_args(name, &args, 2, None)?;
			let alternatives: Vec<String> = args[1..]
				.iter()
				.map(|other| format!("{} == {other}", args[0]))
				.collect();
			Ok(format!("({})", alternatives.join(" or ")))
		}
		"ne" | "lt" | "le" | "gt" | "ge" => {
			expect_args(name, &args, 2, Some(2))?;
			let op = match name {
				"ne" => "!=",
				"lt" => "<",
				"le" => "<=",
				"gt" => ">",
				_ => ">=",
			};
			Ok(format!("({} {op} {})", args[0], args[1]))
		}
		"print" => {
			expect_args(name, &args, 1, None)?;
			Ok(format!("({} ~ \"\")", args.join(" ~ ")))
		}
		"println" => {
			if args.is_empty() {
				Ok("\"\\n\"".to_string())
			} else {
				Ok(format!("({} ~ \"\\n\")", args.join(" ~ \" \" ~ ")))
			}
		}
		"printf" => {
			expect_args(name, &args, 1, None)?;
			Ok(format!("printf({})", args.join(", ")))
		}
		"b64enc" | "b64dec" => {
			expect_args(name, &args, 1, Some(1))?;
			Ok(format!("({} | {name})", args[0]))
		}
		"required" => match args.as_slice() {
			[value] => Ok(format!("({value} | required)")),
			[message, value] => Ok(format!("({value} | required({message}))")),
			_ => expect_args(name, &args, 1, Some(2)).map(|()| String::new()),
		},
		_ => Err(syntax(format!("function {name:?} not defined"))),
	}
}

//! DVI opcode stream interpreter.
//!
//! A cursor-driven state machine that walks the byte stream one
//! instruction at a time. Operand widths are computed from the opcode
//! value alone; there is no length prefix for most commands. The
//! interpreter owns all mutable decode state (registers, stack, font
//! table, scale), so independent decode sessions never share anything.
//!
//! Document grammar, enforced as a phase machine:
//!
//! ```text
//! preamble -> (bop page-body* eop)* -> postamble -> post-postamble -> fill
//! ```
//!
//! A command encountered outside its legal phase is a fatal
//! `SequenceViolation`, never silently ignored.

use crate::error::{DviError, Result};
use crate::font::metrics::FontMetricsProvider;
use crate::model::command::{Command, Warning};
use crate::model::fonts::{FontDefinition, FontTable};
use crate::model::registers::{DviStack, RegisterState};
use crate::model::scale::DocumentScale;
use crate::parser::cursor::Cursor;

/// Document-level decode phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing decoded yet; only the preamble is legal here.
    Start,
    /// Between the preamble and the postamble, outside any page.
    Outer,
    /// Inside a begin-page/end-page pair.
    Page,
    /// Between the postamble and the post-postamble.
    Post,
    /// Post-postamble seen; the rest of the stream is fill.
    Done,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Outer => "between-pages",
            Phase::Page => "page",
            Phase::Post => "postamble",
            Phase::Done => "done",
        }
    }
}

/// Result of a complete decode: the replayable command log plus the
/// collected warnings and summary facts.
#[derive(Debug)]
pub struct Decoded {
    /// Every decoded command, in stream order.
    pub commands: Vec<Command>,
    /// Non-fatal conditions encountered along the way.
    pub warnings: Vec<Warning>,
    /// Number of completed pages.
    pub pages: usize,
    /// Scale factors from the preamble.
    pub scale: Option<DocumentScale>,
    /// Fill bytes consumed after the post-postamble.
    pub fill_bytes: usize,
    /// False when decoding stopped early at a page limit.
    pub complete: bool,
}

/// The decode session.
///
/// Single-threaded and fully synchronous: one forward pass over an
/// immutable buffer, each opcode's meaning depending on state established
/// by all prior opcodes. `step` decodes one command; `run` drives the loop
/// to the end of the stream.
pub struct Interpreter<'a> {
    cursor: Cursor<'a>,
    registers: RegisterState,
    stack: DviStack,
    fonts: FontTable,
    scale: Option<DocumentScale>,
    phase: Phase,
    commands: Vec<Command>,
    warnings: Vec<Warning>,
    pages: usize,
    max_pages: Option<usize>,
    stopped: bool,
    fill_bytes: usize,
    metrics: Option<&'a dyn FontMetricsProvider>,
}

impl<'a> Interpreter<'a> {
    /// Create a session over a complete in-memory DVI stream.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(buf),
            registers: RegisterState::default(),
            stack: DviStack::default(),
            fonts: FontTable::default(),
            scale: None,
            phase: Phase::Start,
            commands: Vec::new(),
            warnings: Vec::new(),
            pages: 0,
            max_pages: None,
            stopped: false,
            fill_bytes: 0,
            metrics: None,
        }
    }

    /// Stop decoding after `n` completed pages (0 means no limit).
    pub fn max_pages(mut self, n: usize) -> Self {
        self.max_pages = if n == 0 { None } else { Some(n) };
        self
    }

    /// Resolve font names against `provider` as definitions are decoded.
    /// Resolution failure is a warning, never a decode abort.
    pub fn metrics(mut self, provider: &'a dyn FontMetricsProvider) -> Self {
        self.metrics = Some(provider);
        self
    }

    /// Current register file, for inspection between steps.
    pub fn registers(&self) -> &RegisterState {
        &self.registers
    }

    /// Current save-stack depth.
    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Fonts defined so far.
    pub fn fonts(&self) -> &FontTable {
        &self.fonts
    }

    /// Decode the whole stream and return the command log.
    pub fn run(mut self) -> Result<Decoded> {
        while self.step()?.is_some() {}
        if self.phase != Phase::Done && !self.stopped {
            return Err(DviError::UnexpectedEnd {
                offset: self.cursor.tell(),
                phase: self.phase.name(),
            });
        }
        Ok(Decoded {
            commands: self.commands,
            warnings: self.warnings,
            pages: self.pages,
            scale: self.scale,
            fill_bytes: self.fill_bytes,
            complete: self.phase == Phase::Done,
        })
    }

    /// Decode one command and append it to the log, returning `None` once
    /// the stream is exhausted, the post-postamble has been processed, or
    /// a page limit stopped the session.
    pub fn step(&mut self) -> Result<Option<Command>> {
        if self.stopped || self.phase == Phase::Done || self.cursor.at_end() {
            return Ok(None);
        }
        let offset = self.cursor.tell();
        let opcode = self.cursor.read_u8()?;
        let command = self.dispatch(opcode, offset)?;
        self.commands.push(command.clone());
        Ok(Some(command))
    }

    /// Decode the operands of `opcode` (read at `offset`) and apply its
    /// state effects. Exhaustive over all 256 opcode values.
    fn dispatch(&mut self, opcode: u8, offset: usize) -> Result<Command> {
        match opcode {
            // set_char_0 .. set_char_127: the character is the opcode.
            0..=127 => {
                self.require_page(opcode, offset)?;
                Ok(Command::SetChar {
                    code: u32::from(opcode),
                })
            }
            // set1 .. set4
            128..=131 => {
                self.require_page(opcode, offset)?;
                let code = self.cursor.read_uint((opcode - 127) as usize)? as u32;
                Ok(Command::SetChar { code })
            }
            // set_rule
            132 => {
                self.require_page(opcode, offset)?;
                let height = self.cursor.read_i32()?;
                let width = self.cursor.read_i32()?;
                self.registers.move_right(width);
                Ok(Command::SetRule { height, width })
            }
            // put1 .. put4
            133..=136 => {
                self.require_page(opcode, offset)?;
                let code = self.cursor.read_uint((opcode - 132) as usize)? as u32;
                Ok(Command::PutChar { code })
            }
            // put_rule: same operands as set_rule, h unchanged
            137 => {
                self.require_page(opcode, offset)?;
                let height = self.cursor.read_i32()?;
                let width = self.cursor.read_i32()?;
                Ok(Command::PutRule { height, width })
            }
            // nop: legal anywhere after the preamble
            138 => {
                if self.phase == Phase::Start {
                    return Err(self.violation(opcode, offset));
                }
                Ok(Command::Nop)
            }
            // bop
            139 => {
                if self.phase != Phase::Outer {
                    return Err(self.violation(opcode, offset));
                }
                self.stack.clear();
                self.registers.reset_to_origin();
                self.fonts.clear_current();
                let mut counters = [0i32; 10];
                for c in &mut counters {
                    *c = self.cursor.read_i32()?;
                }
                self.phase = Phase::Page;
                Ok(Command::Bop { counters })
            }
            // eop
            140 => {
                self.require_page(opcode, offset)?;
                if !self.stack.is_empty() {
                    self.warnings.push(Warning::UnbalancedStack {
                        page: self.pages + 1,
                        depth: self.stack.depth(),
                        offset,
                    });
                }
                self.pages += 1;
                self.phase = Phase::Outer;
                if let Some(limit) = self.max_pages
                    && self.pages >= limit
                {
                    self.stopped = true;
                }
                Ok(Command::Eop)
            }
            // push
            141 => {
                self.require_page(opcode, offset)?;
                self.stack.push(self.registers);
                Ok(Command::Push)
            }
            // pop
            142 => {
                self.require_page(opcode, offset)?;
                match self.stack.pop() {
                    Some(regs) => {
                        self.registers = regs;
                        Ok(Command::Pop)
                    }
                    None => Err(DviError::StackUnderflow { opcode, offset }),
                }
            }
            // right1 .. right4
            143..=146 => {
                self.require_page(opcode, offset)?;
                let delta = self.cursor.read_int((opcode - 142) as usize)? as i32;
                self.registers.move_right(delta);
                Ok(Command::Right { delta })
            }
            // w0 .. w4: width 0 reuses the stored amount
            147..=151 => {
                self.require_page(opcode, offset)?;
                let width = (opcode - 147) as usize;
                if width > 0 {
                    self.registers.w = self.cursor.read_int(width)? as i32;
                }
                let delta = self.registers.w;
                self.registers.move_right(delta);
                Ok(Command::MoveW { delta })
            }
            // x0 .. x4
            152..=156 => {
                self.require_page(opcode, offset)?;
                let width = (opcode - 152) as usize;
                if width > 0 {
                    self.registers.x = self.cursor.read_int(width)? as i32;
                }
                let delta = self.registers.x;
                self.registers.move_right(delta);
                Ok(Command::MoveX { delta })
            }
            // down1 .. down4
            157..=160 => {
                self.require_page(opcode, offset)?;
                let delta = self.cursor.read_int((opcode - 156) as usize)? as i32;
                self.registers.move_down(delta);
                Ok(Command::Down { delta })
            }
            // y0 .. y4
            161..=165 => {
                self.require_page(opcode, offset)?;
                let width = (opcode - 161) as usize;
                if width > 0 {
                    self.registers.y = self.cursor.read_int(width)? as i32;
                }
                let delta = self.registers.y;
                self.registers.move_down(delta);
                Ok(Command::MoveY { delta })
            }
            // z0 .. z4
            166..=170 => {
                self.require_page(opcode, offset)?;
                let width = (opcode - 166) as usize;
                if width > 0 {
                    self.registers.z = self.cursor.read_int(width)? as i32;
                }
                let delta = self.registers.z;
                self.registers.move_down(delta);
                Ok(Command::MoveZ { delta })
            }
            // fnt_num_0 .. fnt_num_63
            171..=234 => {
                self.require_page(opcode, offset)?;
                let id = i32::from(opcode - 171);
                self.select_font(id, opcode, offset)
            }
            // fnt1 .. fnt4
            235..=238 => {
                self.require_page(opcode, offset)?;
                let id = self.read_font_id((opcode - 234) as usize)?;
                self.select_font(id, opcode, offset)
            }
            // xxx1 .. xxx4: length-prefixed opaque payload, read exactly once
            239..=242 => {
                self.require_page(opcode, offset)?;
                let len = self.cursor.read_uint((opcode - 238) as usize)? as usize;
                let data = self.cursor.read_bytes(len)?.to_vec();
                Ok(Command::Special { data })
            }
            // fnt_def1 .. fnt_def4
            243..=246 => {
                if !matches!(self.phase, Phase::Outer | Phase::Page | Phase::Post) {
                    return Err(self.violation(opcode, offset));
                }
                let id = self.read_font_id((opcode - 242) as usize)?;
                self.define_font(id, opcode, offset)
            }
            // pre
            247 => {
                if self.phase != Phase::Start {
                    return Err(self.violation(opcode, offset));
                }
                let format = self.cursor.read_u8()?;
                let scale = DocumentScale {
                    num: self.cursor.read_u32()?,
                    den: self.cursor.read_u32()?,
                    mag: self.cursor.read_u32()?,
                };
                if !scale.is_valid() {
                    return Err(DviError::InvalidScale {
                        offset,
                        num: scale.num,
                        den: scale.den,
                    });
                }
                let comment_len = self.cursor.read_u8()? as usize;
                let comment =
                    String::from_utf8_lossy(self.cursor.read_bytes(comment_len)?).into_owned();
                self.scale = Some(scale);
                self.phase = Phase::Outer;
                Ok(Command::Preamble {
                    format,
                    scale,
                    comment,
                })
            }
            // post
            248 => {
                if self.phase != Phase::Outer {
                    return Err(self.violation(opcode, offset));
                }
                let last_page = self.cursor.read_i32()?;
                let scale = DocumentScale {
                    num: self.cursor.read_u32()?,
                    den: self.cursor.read_u32()?,
                    mag: self.cursor.read_u32()?,
                };
                let tallest = self.cursor.read_i32()?;
                let widest = self.cursor.read_i32()?;
                let max_depth = self.cursor.read_u16()?;
                let pages = self.cursor.read_u16()?;
                if let Some(preamble) = self.scale
                    && preamble != scale
                {
                    self.warnings.push(Warning::ScaleMismatch {
                        preamble,
                        postamble: scale,
                        offset,
                    });
                }
                self.phase = Phase::Post;
                Ok(Command::Postamble {
                    last_page,
                    scale,
                    tallest,
                    widest,
                    max_depth,
                    pages,
                })
            }
            // post_post: the rest of the stream is fill and is not decoded
            249 => {
                if self.phase != Phase::Post {
                    return Err(self.violation(opcode, offset));
                }
                let postamble = self.cursor.read_i32()?;
                let format = self.cursor.read_u8()?;
                self.fill_bytes = self.cursor.skip_to_end();
                self.phase = Phase::Done;
                Ok(Command::PostPostamble { postamble, format })
            }
            250..=255 => Err(DviError::UndefinedOpcode { opcode, offset }),
        }
    }

    fn require_page(&self, opcode: u8, offset: usize) -> Result<()> {
        if self.phase == Phase::Page {
            Ok(())
        } else {
            Err(self.violation(opcode, offset))
        }
    }

    fn violation(&self, opcode: u8, offset: usize) -> DviError {
        DviError::SequenceViolation {
            opcode,
            offset,
            phase: self.phase.name(),
        }
    }

    /// Font-id operands are unsigned in the 1-3 byte forms; only the
    /// 4-byte form carries a sign.
    fn read_font_id(&mut self, width: usize) -> Result<i32> {
        if width == 4 {
            self.cursor.read_i32()
        } else {
            Ok(self.cursor.read_uint(width)? as i32)
        }
    }

    fn select_font(&mut self, id: i32, opcode: u8, offset: usize) -> Result<Command> {
        if self.fonts.select(id) {
            Ok(Command::SelectFont { id })
        } else {
            Err(DviError::UndefinedFont { id, opcode, offset })
        }
    }

    /// Decode the fixed tail of a font definition and register it.
    ///
    /// A re-definition is tolerated only between the postamble and the
    /// post-postamble, where producers re-list every font as a cross-check,
    /// and only when it matches the in-document definition exactly.
    fn define_font(&mut self, id: i32, opcode: u8, offset: usize) -> Result<Command> {
        let checksum = self.cursor.read_u32()?;
        let scale_factor = self.cursor.read_u32()?;
        let design_size = self.cursor.read_u32()?;
        let dir_len = self.cursor.read_u8()? as usize;
        let name_len = self.cursor.read_u8()? as usize;
        let directory = String::from_utf8_lossy(self.cursor.read_bytes(dir_len)?).into_owned();
        let name = String::from_utf8_lossy(self.cursor.read_bytes(name_len)?).into_owned();
        let def = FontDefinition {
            id,
            checksum,
            scale_factor,
            design_size,
            directory,
            name,
        };

        if let Some(existing) = self.fonts.get(id) {
            if self.phase == Phase::Post && *existing == def {
                return Ok(Command::DefineFont(def));
            }
            return Err(DviError::DuplicateFontDefinition { id, opcode, offset });
        }

        if let Some(provider) = self.metrics
            && provider.resolve(&def.name).is_err()
        {
            self.warnings.push(Warning::MetricsNotFound {
                id,
                font: def.name.clone(),
            });
        }
        self.fonts.insert(def.clone());
        Ok(Command::DefineFont(def))
    }
}

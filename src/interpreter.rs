use crate::bits;
use crate::config::{Config, KeyResume};
use crate::error::{Error, Result};
use crate::font;
use crate::framebuffer::{Framebuffer, HEIGHT, WIDTH};
use crate::instruction::Instruction;
use crate::keypad::{InputState, Keypad, MAX_KEY};
use crate::memory::{Memory, PROGRAM_START};
use log::{debug, trace, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

const REGISTER_COUNT: usize = 16;
const STACK_SIZE: usize = 16;
/// VF doubles as the carry, borrow, shifted-out bit and collision flag.
const FLAG: usize = 0xF;

wrapper! {
    RegisterArray => REGISTER_COUNT
}

#[derive(Debug)]
pub struct Interpreter {
    i: u16,                   // Index register
    pc: u16,                  // Program counter
    stack: Vec<u16>,          // Return addresses, at most STACK_SIZE deep
    memory: Memory,           // Memory
    framebuffer: Framebuffer, // Display
    delay: u8,                // Delay timer
    sound: u8,                // Sound timer
    registers: RegisterArray, // Variable registers (V0..=VF)
    keypad: Keypad,           // Last key and FX0A state
    config: Config,
    rng: StdRng,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            i: 0,
            pc: PROGRAM_START as u16,
            stack: Vec::with_capacity(STACK_SIZE),
            memory: Memory::new(),
            framebuffer: Framebuffer::default(),
            delay: 0,
            sound: 0,
            registers: RegisterArray::default(),
            keypad: Keypad::new(config.key_consumption),
            config,
            rng,
        }
    }

    /// Back to the power-on state. The random source keeps its position.
    pub fn reset(&mut self) {
        self.i = 0;
        self.pc = PROGRAM_START as u16;
        self.stack.clear();
        self.memory = Memory::new();
        self.framebuffer.clear();
        self.delay = 0;
        self.sound = 0;
        self.registers = RegisterArray::default();
        self.keypad = Keypad::new(self.config.key_consumption);
    }

    pub fn load_program(&mut self, rom: &[u8]) -> Result<()> {
        self.memory.load(rom)
    }

    /// One tick: fetch/decode/execute unless blocked on `FX0A`, then both
    /// timers count down.
    pub fn step(&mut self) -> Result<()> {
        if !self.keypad.is_awaiting() {
            let inst = self.decode()?;
            self.execute_instruction(inst)?;
        }
        self.tick_timers();
        Ok(())
    }

    /// Delivers a key press. Completes a pending `FX0A`, otherwise it only
    /// becomes the key seen by `EX9E`/`EXA1`.
    pub fn press_key(&mut self, key: u8) -> Result<()> {
        if key > MAX_KEY {
            return Err(Error::InvalidKey(key));
        }
        if let Some(register) = self.keypad.press(key) {
            self.registers[register] = key;
            if self.config.key_resume == KeyResume::SkipNext {
                self.pc = self.pc.wrapping_add(2);
            }
            debug!("Captured key {key:X} into V{register:X} [pc: {:#05X}]", self.pc);
        }
        Ok(())
    }

    /// Runs an already-fetched opcode without touching the timers.
    pub fn execute(&mut self, opcode: u16) -> Result<()> {
        self.execute_instruction(Instruction::from(opcode))
    }

    pub fn framebuffer_snapshot(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.keypad.is_awaiting()
    }

    pub fn input_state(&self) -> InputState {
        self.keypad.state()
    }

    pub fn last_key(&self) -> Option<u8> {
        self.keypad.last_key()
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn register(&self, x: usize) -> u8 {
        self.registers[x]
    }

    pub fn registers(&self) -> &[u8] {
        &self.registers[..]
    }

    pub fn stack_pointer(&self) -> usize {
        self.stack.len()
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound
    }

    /// The host should be beeping.
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn fetch(&mut self) -> Result<u16> {
        let inst = self.memory.read_word(self.pc as usize)?;
        self.pc = self.pc.wrapping_add(2);
        Ok(inst)
    }

    fn decode(&mut self) -> Result<Instruction> {
        Ok(Instruction::from(self.fetch()?))
    }

    fn execute_instruction(&mut self, inst: Instruction) -> Result<()> {
        debug!("Processing instruction [{:?}] {}", inst, inst);
        let (x, y) = (inst.x(), inst.y());
        match inst.nibbles {
            [0, 0, 0xE, 0] => self.framebuffer.clear(),
            [0, 0, 0xE, 0xE] => self.ret()?,
            [1, ..] => self.jump(inst.nnn()),
            [2, ..] => self.call(inst.nnn())?,
            [3, ..] => self.skip_if(self.registers[x] == inst.nn()),
            [4, ..] => self.skip_if(self.registers[x] != inst.nn()),
            [5, ..] => self.skip_if(self.registers[x] == self.registers[y]),
            [6, ..] => self.set_register(x, inst.nn()),
            [7, ..] => self.add_to_register(x, inst.nn()),
            [8, _, _, op] => self.alu(inst, x, y, op),
            [9, ..] => self.skip_if(self.registers[x] != self.registers[y]),
            [0xA, ..] => self.set_memory_ptr(inst.nnn()),
            [0xB, ..] => self.jump(u16::from(self.registers[0]).wrapping_add(inst.nnn())),
            [0xC, ..] => self.set_random(x, inst.nn()),
            [0xD, ..] => self.draw_sprite(x, y, inst.n())?,
            [0xE, _, 9, 0xE] => self.skip_on_key(x, true),
            [0xE, _, 0xA, 1] => self.skip_on_key(x, false),
            // family F is keyed by the low nibble; only X5 also looks at the third
            [0xF, _, _, 3] => self.store_bcd(x)?,
            [0xF, _, 1, 5] => self.delay = self.registers[x],
            [0xF, _, 5, 5] => self.store_registers(x)?,
            [0xF, _, 6, 5] => self.load_registers(x)?,
            [0xF, _, _, 7] => self.registers[x] = self.delay,
            [0xF, _, _, 8] => self.sound = self.registers[x],
            [0xF, _, _, 9] => self.i = u16::from(self.registers[x]) * font::GLYPH_SIZE as u16,
            [0xF, _, _, 0xA] => self.keypad.await_key(x),
            [0xF, _, _, 0xE] => self.i = self.i.wrapping_add(u16::from(self.registers[x])),
            _ => warn!("Ignoring unknown instruction [{:?}]", inst),
        }
        Ok(())
    }

    fn tick_timers(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
        trace!("Timers [delay: {}] [sound: {}]", self.delay, self.sound);
    }

    fn ret(&mut self) -> Result<()> {
        let address = self.stack.pop().ok_or(Error::StackUnderflow)?;
        self.pc = address;
        debug!("Returned to {address:#05X} [depth: {}]", self.stack.len());
        Ok(())
    }

    fn jump(&mut self, address: u16) {
        self.pc = address;
        debug!("Jumped PC to {address:#05X}");
    }

    fn call(&mut self, address: u16) -> Result<()> {
        if self.stack.len() >= STACK_SIZE {
            return Err(Error::StackOverflow { address });
        }
        self.stack.push(self.pc);
        self.pc = address;
        debug!("Called {address:#05X} [depth: {}]", self.stack.len());
        Ok(())
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn set_register(&mut self, register: usize, value: u8) {
        self.registers[register] = value;
        debug!("Set register V{register:01X} to {value}");
    }

    fn add_to_register(&mut self, register: usize, value: u8) {
        self.registers[register] = self.registers[register].wrapping_add(value);
        debug!("Added {value} to register V{register:01X}");
    }

    /// `8XYN`. The flag is always written after VX so that it survives X == F.
    fn alu(&mut self, inst: Instruction, x: usize, y: usize, op: u8) {
        let (vx, vy) = (self.registers[x], self.registers[y]);
        let (value, flag) = match op {
            0 => (vy, None),
            1 => (vx | vy, None),
            2 => (vx & vy, None),
            3 => (vx ^ vy, None),
            4 => {
                let (sum, carry) = vx.overflowing_add(vy);
                (sum, Some(carry as u8))
            }
            5 => {
                let (diff, borrow) = vx.overflowing_sub(vy);
                (diff, Some(!borrow as u8))
            }
            6 => (vy >> 1, Some(vy & 1)),
            7 => {
                let (diff, borrow) = vy.overflowing_sub(vx);
                (diff, Some(!borrow as u8))
            }
            0xE => (vy << 1, Some(vy >> 7)),
            _ => {
                warn!("Ignoring unknown instruction [{:?}]", inst);
                return;
            }
        };
        self.registers[x] = value;
        if let Some(flag) = flag {
            self.registers[FLAG] = flag;
        }
    }

    fn set_memory_ptr(&mut self, value: u16) {
        self.i = value;
        debug!("Set index register I to {value:#05X}");
    }

    fn set_random(&mut self, register: usize, mask: u8) {
        self.registers[register] = self.rng.gen::<u8>() & mask;
    }

    /// `DXYN`: XOR an 8xN sprite from memory at I onto the screen, wrapping
    /// at the edges. VF ends up 1 iff any lit pixel was turned off.
    fn draw_sprite(&mut self, vx: usize, vy: usize, height: u8) -> Result<()> {
        let x = self.registers[vx] as usize % WIDTH;
        let y = self.registers[vy] as usize % HEIGHT;
        let sprite = self.memory.range(self.i as usize, height as usize)?;
        trace!("x: {x} y: {y} height: {height}");
        self.registers[FLAG] = 0;
        let mut collision = false;
        for (row, &line) in sprite.iter().enumerate() {
            let py = (y + row) % HEIGHT;
            for col in 0..8 {
                if !bits::set(7 - col as u8, line) {
                    continue;
                }
                let px = (x + col) % WIDTH;
                trace!("Toggling pixel [row: {row}] at ({px}, {py})");
                collision |= self.framebuffer.toggle(px, py);
            }
        }
        if collision {
            self.registers[FLAG] = 1;
        }
        Ok(())
    }

    fn skip_on_key(&mut self, register: usize, want_pressed: bool) {
        let skip = self.keypad.check(self.registers[register], want_pressed);
        self.skip_if(skip);
    }

    fn store_bcd(&mut self, register: usize) -> Result<()> {
        let value = self.registers[register];
        let cells = self.memory.range_mut(self.i as usize, 3)?;
        cells.copy_from_slice(&[value / 100, value / 10 % 10, value % 10]);
        Ok(())
    }

    /// `FX55`: V0..=VX to memory at I. I itself is left unchanged.
    fn store_registers(&mut self, last: usize) -> Result<()> {
        let cells = self.memory.range_mut(self.i as usize, last + 1)?;
        cells.copy_from_slice(&self.registers[..=last]);
        Ok(())
    }

    fn load_registers(&mut self, last: usize) -> Result<()> {
        let cells = self.memory.range(self.i as usize, last + 1)?;
        self.registers[..=last].copy_from_slice(cells);
        Ok(())
    }
}

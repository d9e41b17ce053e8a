/// Number of variable registers.
pub const VAR_COUNT: usize = 16;

/// Addressable floating-point registers, written and read by the host.
#[derive(Debug, PartialEq, Clone)]
pub struct VariableStore {
    vars: [f32; VAR_COUNT],
}
impl VariableStore {
    /// Creates a new `VariableStore` with every register set to `initial`.
    pub fn new(initial: f32) -> Self {
        Self {
            vars: [initial; VAR_COUNT],
        }
    }

    /// Returns the value of a register.
    ///
    /// Only the low nibble of `index` is used.
    pub fn get(&self, index: u8) -> f32 {
        self.vars[Self::slot(index)]
    }

    /// Sets the value of a register.
    ///
    /// Only the low nibble of `index` is used.
    pub fn set(&mut self, index: u8, value: f32) {
        self.vars[Self::slot(index)] = value;
    }

    /// Returns all registers.
    pub fn as_slice(&self) -> &[f32] {
        &self.vars
    }

    fn slot(index: u8) -> usize {
        (index & 0x0F) as usize
    }
}

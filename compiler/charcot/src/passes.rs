// Optimizer stages run over the IR text. The stock stages leave the text
// untouched, but the pipeline must work with any stage being a no-op.

/// One IR-to-IR transform.
pub trait Pass {
    fn name(&self) -> &str;
    fn run(&self, ir: String) -> String;
}

pub struct ConstantFolding;

impl Pass for ConstantFolding {
    fn name(&self) -> &str {
        "constant-folding"
    }

    fn run(&self, ir: String) -> String {
        ir
    }
}

pub struct DeadCodeElimination;

impl Pass for DeadCodeElimination {
    fn name(&self) -> &str {
        "dead-code-elimination"
    }

    fn run(&self, ir: String) -> String {
        ir
    }
}

pub struct CommonSubexpressionElimination;

impl Pass for CommonSubexpressionElimination {
    fn name(&self) -> &str {
        "common-subexpression-elimination"
    }

    fn run(&self, ir: String) -> String {
        ir
    }
}

/// Runs passes in insertion order.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constant folding, then dead code elimination, then CSE.
    pub fn with_default_passes() -> Self {
        let mut manager = Self::new();
        manager.add(ConstantFolding);
        manager.add(DeadCodeElimination);
        manager.add(CommonSubexpressionElimination);
        manager
    }

    pub fn add(&mut self, pass: impl Pass + 'static) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    pub fn run(&self, mut ir: String) -> String {
        for pass in &self.passes {
            log::debug!("running pass {}", pass.name());
            ir = pass.run(ir);
        }
        ir
    }
}

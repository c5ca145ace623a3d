use crate::colors::Painter;
use crate::context::TaskContext;
use crate::route::Reporter;

/// Reports routing messages on stdout, next to task output.
pub struct TerminalReporter<'a> {
    ctx: &'a TaskContext,
    painter: Painter,
    quiet: bool,
}

impl<'a> TerminalReporter<'a> {
    pub fn new(ctx: &'a TaskContext, painter: Painter, quiet: bool) -> Self {
        Self {
            ctx,
            painter,
            quiet,
        }
    }
}

impl Reporter for TerminalReporter<'_> {
    fn report(&mut self, message: &str) {
        println!("{}", message);
    }

    fn notice(&mut self, message: &str) {
        if !self.quiet {
            println!("{}", self.painter.dim(message));
        }
    }

    fn show_generic_help(&mut self) {
        println!(
            "{}",
            self.ctx
                .renderer(self.painter)
                .full_usage(self.ctx.registry())
        );
    }
}

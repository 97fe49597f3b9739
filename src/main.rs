//! Anemoi CLI.
//!
//! Prints derived parameters, round constants, the diffusion matrix, and
//! permutation or Jive outputs as raw field elements, one per line. Logs go
//! to stderr, controlled by `RUST_LOG`.

use anemoi_jive::anemoi::{num_rounds, Anemoi, AnemoiParams, State, ThreeBranchMixing};
use anemoi_jive::field::{Fp, PrimeField};
use anemoi_jive::{AnemoiError, AnemoiResult};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "anemoi")]
#[command(about = "Anemoi permutation and Jive compression", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Print the number of rounds for a branch count and exponent
    Rounds {
        /// Words per half-state (1-4, or 6)
        #[arg(long)]
        branches: usize,
        /// S-box exponent
        #[arg(long, default_value_t = 5)]
        alpha: u64,
    },

    /// Print numRounds, g, g^-1, alpha, alpha^-1, beta, gamma, delta
    Params(ParamArgs),

    /// Print the C table rows, then the D table rows
    Constants(ParamArgs),

    /// Print the diffusion matrix rows
    Matrix(ParamArgs),

    /// Apply the permutation and print X' then Y'
    Permute {
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        input: StateArgs,
    },

    /// Print the Jive compression of the state
    Compress {
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        input: StateArgs,
    },
}

#[derive(Args)]
struct ParamArgs {
    /// Prime modulus, decimal or 0x hex (default: BN254 scalar field)
    #[arg(long)]
    modulus: Option<String>,
    /// Words per half-state
    #[arg(long, default_value_t = 1)]
    branches: usize,
    /// S-box exponent
    #[arg(long, default_value_t = 5)]
    alpha: u64,
    /// Multiplicative generator of the field
    #[arg(long, default_value_t = 5)]
    generator: u64,
    /// Override the number of rounds
    #[arg(long)]
    rounds: Option<usize>,
    /// Linear layer used for three branches
    #[arg(long, value_enum, default_value_t = MixingArg::Reference)]
    three_branch: MixingArg,
    /// Print elements as fixed-width big-endian hex
    #[arg(long)]
    hex: bool,
}

#[derive(Args)]
struct StateArgs {
    /// X half, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    x: Vec<String>,
    /// Y half, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    y: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MixingArg {
    Reference,
    Corrected,
}

impl From<MixingArg> for ThreeBranchMixing {
    fn from(arg: MixingArg) -> Self {
        match arg {
            MixingArg::Reference => ThreeBranchMixing::Reference,
            MixingArg::Corrected => ThreeBranchMixing::Corrected,
        }
    }
}

impl ParamArgs {
    fn build(&self) -> AnemoiResult<AnemoiParams> {
        let field = match &self.modulus {
            Some(m) => PrimeField::parse_modulus(m)?,
            None => PrimeField::bn254(),
        };
        let mut params = AnemoiParams::new(field, self.branches, self.alpha, self.generator)?
            .with_three_branch_mixing(self.three_branch.into());
        if let Some(rounds) = self.rounds {
            params = params.with_num_rounds(rounds)?;
        }
        Ok(params)
    }

    fn render(&self, field: &PrimeField, e: &Fp) -> String {
        if self.hex {
            format!("0x{}", field.to_hex(e))
        } else {
            e.to_string()
        }
    }
}

impl StateArgs {
    fn parse(&self, field: &PrimeField) -> AnemoiResult<State> {
        let half = |values: &[String]| -> AnemoiResult<Vec<Fp>> {
            values.iter().map(|v| field.parse_element(v)).collect()
        };
        Ok(State::new(half(&self.x)?, half(&self.y)?))
    }
}

fn print_rows(args: &ParamArgs, field: &PrimeField, rows: &[Vec<Fp>]) {
    for row in rows {
        let line: Vec<String> = row.iter().map(|e| args.render(field, e)).collect();
        println!("{}", line.join(" "));
    }
}

fn run(command: Commands) -> AnemoiResult<()> {
    match command {
        Commands::Version => {
            println!("Anemoi v{}", env!("CARGO_PKG_VERSION"));
            println!("Anemoi permutation and Jive compression");
        }
        Commands::Rounds { branches, alpha } => {
            println!("{}", num_rounds(branches, alpha)?);
        }
        Commands::Params(args) => {
            let params = args.build()?;
            let field = params.field();
            println!("{}", params.num_rounds());
            for e in [params.generator(), params.generator_inv()] {
                println!("{}", args.render(field, e));
            }
            println!("{}", params.alpha().value());
            for e in [params.alpha_inv(), params.beta(), params.gamma(), params.delta()] {
                println!("{}", args.render(field, e));
            }
        }
        Commands::Constants(args) => {
            let anemoi = Anemoi::new(args.build()?);
            let field = anemoi.params().field();
            print_rows(&args, field, anemoi.round_constants().c());
            print_rows(&args, field, anemoi.round_constants().d());
        }
        Commands::Matrix(args) => {
            let anemoi = Anemoi::new(args.build()?);
            print_rows(&args, anemoi.params().field(), anemoi.matrix().rows());
        }
        Commands::Permute { params, input } => {
            let anemoi = Anemoi::new(params.build()?);
            let field = anemoi.params().field();
            let out = anemoi.permute(&input.parse(field)?)?;
            for e in out.x().iter().chain(out.y()) {
                println!("{}", params.render(field, e));
            }
        }
        Commands::Compress { params, input } => {
            let anemoi = Anemoi::new(params.build()?);
            let field = anemoi.params().field();
            let digest = anemoi.compress(&input.parse(field)?)?;
            println!("{}", params.render(field, &digest));
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // stdout carries field elements only
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .try_init();
}

fn report(err: &AnemoiError) {
    eprintln!("error[E{}] {}: {}", err.code(), err.name(), err);
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Anemoi v{}", env!("CARGO_PKG_VERSION"));
        println!("Use --help for usage information");
        return ExitCode::SUCCESS;
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

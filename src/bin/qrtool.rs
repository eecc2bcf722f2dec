use clap::{Parser, Subcommand};
use qrforge::config::{parse_ec_level, EncoderConfig, MaskSelection};
use qrforge::decoder::read_back;
use qrforge::encoder::Encoder;
use qrforge::render::{self, Rendering};
use qrforge::{ECLevel, QrCode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "qrforge CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct EncodeOpts {
    /// Text to encode
    #[arg(long)]
    text: String,
    /// Mask pattern 0-7 or `auto` (defaults to QR_MASK, then 0)
    #[arg(long, value_parser = parse_mask)]
    mask: Option<MaskSelection>,
    /// Error correction level L, M, Q or H (defaults to QR_EC_LEVEL, then L)
    #[arg(long, value_parser = parse_level)]
    level: Option<ECLevel>,
}

impl EncodeOpts {
    fn config(&self) -> EncoderConfig {
        let mut config = EncoderConfig::from_env();
        if let Some(mask) = self.mask {
            config = config.with_mask(mask);
        }
        if let Some(level) = self.level {
            config = config.with_ec_level(level);
        }
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Encode text into a PNG image
    Encode {
        #[command(flatten)]
        opts: EncodeOpts,
        #[arg(long)]
        out: PathBuf,
        /// Image side in pixels
        #[arg(long, default_value_t = 256)]
        size: u32,
    },
    /// Print the symbol to the terminal
    Ascii {
        #[command(flatten)]
        opts: EncodeOpts,
    },
    /// Print version, level, mask and codeword details, then read the symbol back
    Inspect {
        #[command(flatten)]
        opts: EncodeOpts,
    },
}

fn parse_mask(value: &str) -> Result<MaskSelection, String> {
    MaskSelection::parse(value).ok_or_else(|| format!("invalid mask '{value}', expected 0-7 or auto"))
}

fn parse_level(value: &str) -> Result<ECLevel, String> {
    parse_ec_level(value).ok_or_else(|| format!("invalid level '{value}', expected L, M, Q or H"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Encode { opts, out, size } => encode_cmd(&opts, &out, size),
        Command::Ascii { opts } => ascii_cmd(&opts),
        Command::Inspect { opts } => inspect_cmd(&opts),
    }
}

fn encode_cmd(opts: &EncodeOpts, out: &Path, size: u32) -> ExitCode {
    match render::render_or_fallback(&opts.text, size, opts.config()) {
        Rendering::Symbol(img) => match img.save_with_format(out, image::ImageFormat::Png) {
            Ok(()) => {
                println!("Wrote {}x{} PNG to {}", img.width(), img.height(), out.display());
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Failed to write {}: {}", out.display(), err);
                ExitCode::FAILURE
            }
        },
        Rendering::Text { text, .. } => {
            eprintln!("Could not encode input, showing it as text:");
            println!("{text}");
            ExitCode::FAILURE
        }
    }
}

fn ascii_cmd(opts: &EncodeOpts) -> ExitCode {
    match Encoder::new(opts.config()).encode(&opts.text) {
        Ok(code) => {
            print!("{}", render::to_ascii(&code));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Encode failed: {err}");
            println!("{}", opts.text);
            ExitCode::FAILURE
        }
    }
}

fn inspect_cmd(opts: &EncodeOpts) -> ExitCode {
    let encoder = Encoder::new(opts.config());
    print_config(encoder.config());
    let plan = match encoder.plan(opts.text.as_bytes()) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("Encode failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    let code = match encoder.encode_with_version(opts.text.as_bytes(), plan.version) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Encode failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Input: {} bytes", opts.text.len());
    print_symbol(&code);
    println!(
        "Codewords: {} data + {} ec = {}",
        plan.data_codewords.len(),
        plan.ec_len(),
        plan.codewords.len()
    );
    println!("Data: {}", hex(&plan.data_codewords));
    println!("EC:   {}", hex(&plan.codewords[plan.data_codewords.len()..]));

    match read_back(&code) {
        Ok(decoded) => {
            println!(
                "Readback: {} bytes, matches input: {}",
                decoded.data.len(),
                decoded.data == opts.text.as_bytes()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Readback failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_config(config: &EncoderConfig) {
    let mask = match config.mask {
        MaskSelection::Fixed(mask) => format!("{mask:?}"),
        MaskSelection::Auto => "auto".to_string(),
    };
    println!(
        "Config: level={:?}, mask={}, versions {}-{}",
        config.ec_level,
        mask,
        config.min_version.number(),
        config.max_version.number()
    );
}

fn print_symbol(code: &QrCode) {
    println!(
        "Version: {} ({}x{}), level={:?}, mask={:?}",
        code.version.number(),
        code.size(),
        code.size(),
        code.error_correction,
        code.mask_pattern
    );
    let dark = code.modules.count_ones();
    let total = code.size() * code.size();
    println!(
        "Dark modules: {}/{} ({:.1}%)",
        dark,
        total,
        dark as f64 * 100.0 / total as f64
    );
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

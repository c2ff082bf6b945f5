use clap::{Parser, Subcommand};
use folio::deploy::{self, Stage};
use folio::pdf::{self, PaperFormat};
use folio::{config, output, site};
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    let describe = env!("FOLIO_GIT_DESCRIBE");
    if describe.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        describe
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Personal website and PDF résumé generator")]
#[command(long_about = "\
Personal website and PDF résumé generator

Your profile lives in a Markdown file that starts with a JSON frontmatter
block. Folio renders it into a Bootstrap page, a full-width résumé variant,
and a PDF of the résumé printed by headless Chrome.

Project layout:

  ./
  ├── folio.toml                   # Optional config (run 'folio gen-config')
  ├── contents/
  │   └── index.md                 # ---json { ... } --- frontmatter
  ├── styles/site.css              # Linked by the generated pages
  ├── bootstrap-5.3.2-dist/        # Linked by the generated pages
  ├── index.html                   # ← deployed primary page
  └── files/resume.pdf             # ← deployed résumé

Stages (each includes the ones before it):
  build     contents/index.md → index.generate.html + index.generate.resume.html
  generate  index.generate.resume.html → index.generate.resume.pdf
  deploy    move the page to index.html and the PDF to files/resume.pdf")]
#[command(version = version_string())]
struct Cli {
    /// Project root: generated pages, config and deploy targets live here
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the page and its résumé variant from a content file
    Build {
        /// Markdown file with JSON frontmatter [default: build.content from config]
        input: Option<PathBuf>,
        /// Output file name, written to the project root [default: <stem>.generate.html]
        output: Option<PathBuf>,
    },
    /// Print an HTML file to PDF with headless Chrome
    Pdf {
        /// HTML file to print
        input: PathBuf,
        /// PDF path [default: input with a .pdf extension]
        output: Option<PathBuf>,
        /// Margin on all four sides in millimetres [default: pdf.margin_mm from config]
        margin_mm: Option<f64>,
        /// Content scale factor [default: pdf.scale from config]
        scale: Option<f64>,
        /// Paper size: A3, A4, A5, Letter, Legal [default: pdf.format from config]
        #[arg(long)]
        format: Option<PaperFormat>,
    },
    /// Run the pipeline up to a stage: build, generate or deploy
    Deploy {
        /// Last stage to run
        #[arg(default_value = "deploy")]
        stage: String,
    },
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let root = cli.root;

    match cli.command {
        Command::Build {
            input,
            output: output_name,
        } => {
            let project = config::load_config(&root)?;
            let input = input.unwrap_or_else(|| root.join(&project.build.content));
            let report = site::build(&root, &input, output_name.as_deref())?;
            output::print_build_output(&report, &root);
        }
        Command::Pdf {
            input,
            output: pdf_path,
            margin_mm,
            scale,
            format,
        } => {
            let project = config::load_config(&root)?;
            let defaults = project.pdf.options();
            let options = pdf::PdfOptions {
                format: format.unwrap_or(defaults.format),
                margin_mm: margin_mm.unwrap_or(defaults.margin_mm),
                scale: scale.unwrap_or(defaults.scale),
            };
            let pdf_path = pdf_path.unwrap_or_else(|| pdf::default_output_path(&input));
            let report = pdf::export_pdf(&input, &pdf_path, &options)?;
            output::print_pdf_output(&report, &root);
        }
        Command::Deploy { stage } => {
            let stage: Stage = match stage.parse() {
                Ok(stage) => stage,
                Err(err) => {
                    eprintln!("{err}");
                    eprintln!("Usage: folio deploy [{}]", Stage::names().join("|"));
                    return Ok(ExitCode::FAILURE);
                }
            };
            let project = config::load_config(&root)?;
            deploy::run(&root, &project, stage, |event| {
                output::print_deploy_event(&event, &root)
            })?;
            println!("==> Done: {stage}");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 reveal-runtime 覆盖率
//! - `cov-workspace`: 运行 workspace 覆盖率
//! - `build-web`: 构建 wasm 宿主并生成 JS 绑定
//! - `config-check`: 检查页面配置文件

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use reveal_runtime::PageConfig;
use walkdir::WalkDir;
use xshell::{Shell, cmd};

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn ensure_tool_available(program: &str, args: &[&str], install_hint: &str) -> anyhow::Result<()> {
    let status = Command::new(program).args(args).status();
    match status {
        Ok(s) if s.success() => Ok(()),
        _ => anyhow::bail!("{program} {} 不可用。\n请先安装：\n{install_hint}\n然后重试。", args.join(" ")),
    }
}

fn ensure_cargo_llvm_cov_available() -> anyhow::Result<()> {
    ensure_tool_available(
        "cargo",
        &["llvm-cov", "--version"],
        "  - cargo install cargo-llvm-cov\n  - rustup component add llvm-tools-preview",
    )
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            let mut fmt = Command::new("cargo");
            fmt.args(["fmt", "--all", "--", "--check"]);
            run("cargo fmt --all -- --check", &mut fmt)?;

            let mut clippy = Command::new("cargo");
            clippy.args(["clippy", "--workspace", "--all-targets"]);
            run("cargo clippy --workspace --all-targets", &mut clippy)?;

            let mut test = Command::new("cargo");
            test.args(["test", "--workspace"]);
            run("cargo test --workspace", &mut test)?;
        }
        "cov-runtime" => {
            ensure_cargo_llvm_cov_available()?;

            let mut cov = Command::new("cargo");
            cov.args(["llvm-cov", "-p", "reveal-runtime", "--all-features", "--html"]);
            run(
                "cargo llvm-cov -p reveal-runtime --all-features --html",
                &mut cov,
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "cov-workspace" => {
            ensure_cargo_llvm_cov_available()?;

            // host-web 的大部分代码只能在浏览器里执行，覆盖率只作趋势参考
            let mut cov = Command::new("cargo");
            cov.args([
                "llvm-cov",
                "--workspace",
                "--exclude",
                "xtask",
                "--all-features",
                "--html",
            ]);
            run(
                "cargo llvm-cov --workspace --exclude xtask --all-features --html",
                &mut cov,
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "build-web" => {
            let debug = args.any(|a| a == "--debug");
            build_web(!debug)?;
        }
        "config-check" => {
            let path = args.next();
            config_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-runtime     运行 reveal-runtime 覆盖率报告
  cov-workspace   运行 workspace 覆盖率报告
  build-web       构建 wasm 宿主到 host-web/static/pkg
  config-check    检查页面配置文件

BUILD-WEB:
  cargo xtask build-web [--debug]

  需要 wasm32-unknown-unknown target 与 wasm-bindgen-cli。
  构建完成后用任意静态服务器打开 host-web/static/index.html。

CONFIG-CHECK:
  cargo xtask config-check [path]

  不带参数：检查 config/ 下所有 .json 文件
  带路径参数：检查指定文件或目录

  检查内容：
    - JSON 语法与字段类型
    - 阈值范围、计数步数与间隔、存储键、选择器

ALIASES (in .cargo/config.toml):
  cargo check-all     -> cargo xtask check-all
  cargo cov-runtime   -> cargo xtask cov-runtime
  cargo cov-workspace -> cargo xtask cov-workspace
  cargo build-web     -> cargo xtask build-web
  cargo config-check  -> cargo xtask config-check
"#
    );
}

//=============================================================================
// build-web 命令实现
//=============================================================================

const WASM_TARGET: &str = "wasm32-unknown-unknown";

/// 构建 wasm 并生成 `--target web` 绑定
fn build_web(release: bool) -> anyhow::Result<()> {
    ensure_tool_available(
        "wasm-bindgen",
        &["--version"],
        "  - rustup target add wasm32-unknown-unknown\n  - cargo install wasm-bindgen-cli",
    )?;

    let sh = Shell::new()?;
    let profile = if release { "release" } else { "debug" };
    let release_flag = release.then_some("--release");

    eprintln!("\n==> cargo build -p host-web --target {WASM_TARGET} ({profile})");
    cmd!(sh, "cargo build -p host-web --target {WASM_TARGET} {release_flag...}").run()?;

    let wasm = PathBuf::from("target")
        .join(WASM_TARGET)
        .join(profile)
        .join("host_web.wasm");
    let out_dir = PathBuf::from("host-web/static/pkg");

    eprintln!("\n==> wasm-bindgen {}", wasm.display());
    cmd!(sh, "wasm-bindgen {wasm} --target web --no-typescript --out-dir {out_dir}").run()?;

    eprintln!("\n输出目录: {}", out_dir.display());
    Ok(())
}

//=============================================================================
// config-check 命令实现
//=============================================================================

/// 默认配置目录（相对于 workspace root）
const DEFAULT_CONFIG_DIR: &str = "config";

/// 单个文件的检查结果
enum ConfigStatus {
    Valid,
    Invalid(String),
}

/// 执行配置检查
fn config_check(path: Option<&str>) -> anyhow::Result<()> {
    let files = match path {
        Some(p) => {
            let path = PathBuf::from(p);
            if path.is_file() {
                vec![path]
            } else if path.is_dir() {
                collect_config_files(&path)
            } else {
                anyhow::bail!("路径不存在: {}", p);
            }
        }
        None => {
            let dir = Path::new(DEFAULT_CONFIG_DIR);
            if !dir.exists() {
                anyhow::bail!(
                    "默认配置目录不存在: {}\n请在 workspace 根目录运行，或指定配置路径",
                    dir.display()
                );
            }
            collect_config_files(dir)
        }
    };

    if files.is_empty() {
        eprintln!("未找到配置文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个配置文件...\n", files.len());

    let mut errors = 0;
    for file in &files {
        match check_config_file(file) {
            ConfigStatus::Valid => eprintln!("[OK] {}", file.display()),
            ConfigStatus::Invalid(message) => {
                eprintln!("[ERROR] {}: {}", file.display(), message);
                errors += 1;
            }
        }
    }

    eprintln!("─────────────────────────────────────────────────────");
    if errors > 0 {
        eprintln!("❌ {} 个文件中有 {} 个错误", files.len(), errors);
        anyhow::bail!("配置检查发现错误");
    }
    eprintln!("✅ 检查通过，无错误");
    Ok(())
}

/// 收集目录下的所有 `.json` 文件
fn collect_config_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// 检查单个配置文件
fn check_config_file(file: &Path) -> ConfigStatus {
    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => return ConfigStatus::Invalid(format!("无法读取文件 - {}", e)),
    };

    match PageConfig::from_json(&content) {
        Ok(_) => ConfigStatus::Valid,
        Err(e) => ConfigStatus::Invalid(e.to_string()),
    }
}

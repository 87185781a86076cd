//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::{DEFAULT_LSB, MAX_LSB, MIN_LSB};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，可将任意文件隐藏在无损格式图像 (如 PNG, BMP) 的 RGB 通道中。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，可将任意文件隐藏在无损格式图像 (如 PNG, BMP) 的 RGB 通道中，并可无损恢复。"
)]
pub struct Cli {
    /// 输出更详细的日志 (-v 为 info，-vv 为 debug)。`RUST_LOG` 优先。
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量查询)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中隐藏文件内容。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的数据。
    Recover(RecoverArgs),

    /// 查询图像在给定比特深度下能隐藏多少字节。
    Capacity(CapacityArgs),
}

fn lsb_parser() -> clap::builder::RangedI64ValueParser<u8> {
    clap::value_parser!(u8).range(i64::from(MIN_LSB)..=i64::from(MAX_LSB))
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文件路径 (任意内容)。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 隐写完成后，保存结果图像的输出路径。
    /// 默认为输入图像同目录下的 `doctored_<文件名>`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 每个颜色通道使用的低位比特数 (1-8)。
    #[arg(short = 'b', long, default_value_t = DEFAULT_LSB, value_parser = lsb_parser())]
    pub lsb: u8,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复数据后的保存路径。
    /// 默认为图像同目录下的 `recovered_<文件名主干>.txt`。
    #[arg(short, long, conflicts_with = "stdout")]
    pub text: Option<PathBuf>,

    /// 隐藏时使用的低位比特数 (1-8)，必须与隐藏时一致。
    #[arg(short = 'b', long, default_value_t = DEFAULT_LSB, value_parser = lsb_parser())]
    pub lsb: u8,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 将恢复的原始字节直接写到标准输出，而不是文件。
    #[arg(long)]
    pub stdout: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要查询的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 每个颜色通道使用的低位比特数 (1-8)。
    #[arg(short = 'b', long, default_value_t = DEFAULT_LSB, value_parser = lsb_parser())]
    pub lsb: u8,

    /// 可选：检查该文件能否放入图像。
    #[arg(short, long)]
    pub text: Option<PathBuf>,
}

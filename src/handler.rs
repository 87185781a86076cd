//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::capacity::{capacity_bytes, check_capacity};
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{HIDDEN_IMAGE_PREFIX, RECOVERED_TEXT_PREFIX};
use crate::container::{carrier_format, decode_container, encode_container};
use crate::cursor::Lsb;
use crate::error::StegoError;
use crate::steganography::{decode, encode};
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbaImage;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和载荷文件、检查隐写空间是否足够、调用核心编码函数，
/// 最后将结果按目标路径的扩展名编码并写入。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和比特深度的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像，或无法读取载荷文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 目标格式不是无损格式。
/// * 图像没有足够的空间来隐藏载荷。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_output_path(&args.image, HIDDEN_IMAGE_PREFIX, None));
    ensure_writable(&dest, args.force)?;
    let format = carrier_format(&dest).with_context(|| {
        format!(
            "Cannot write a carrier image to: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    let grid = load_grid(&args.image)?;

    let payload = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read payload file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    info!(
        "hiding {} bytes in {}x{} image at lsb {}",
        payload.len(),
        grid.width(),
        grid.height(),
        args.lsb
    );

    let encoded = encode(&grid, &payload, args.lsb).map_err(report_capacity)?;

    let bytes = encode_container(&encoded, format)
        .with_context(|| format!("Failed to encode the result as {format:?}"))?;
    debug!("encoded carrier is {} bytes", bytes.len());

    fs::write(&dest, bytes).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The payload has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、调用核心解码函数，
/// 最后将恢复的字节写入目标文件或标准输出。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像。
/// * 图像中的长度头部无效 (比特深度不匹配或没有隐藏数据)。
/// * 目标文件已存在且未指定 `--force`，或无法写入。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let grid = load_grid(&args.image)?;

    let payload = decode(&grid, args.lsb).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}' at lsb {}. \nThe image may not contain hidden data or was hidden with a different lsb.",
            args.image.to_string_lossy().red().bold(),
            args.lsb.to_string().red().bold()
        )
    })?;
    info!("recovered {} bytes at lsb {}", payload.len(), args.lsb);

    if args.stdout {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&payload)
            .and_then(|()| stdout.flush())
            .context("Unable to write recovered data to stdout")?;
        return Ok(());
    }

    let dest = args.text.clone().unwrap_or_else(|| {
        default_output_path(&args.image, RECOVERED_TEXT_PREFIX, Some("txt"))
    });
    ensure_writable(&dest, args.force)?;

    fs::write(&dest, payload).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The hidden data has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// 报告图像在给定比特深度下的可用容量；若提供了载荷文件，还会检查其能否放入。
///
/// # Errors
///
/// 无法读取文件，或载荷放不下时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let grid = load_grid(&args.image)?;
    let (width, height) = grid.dimensions();
    let capacity = capacity_bytes(width, height, Lsb::new(args.lsb)?);
    debug!("{width}x{height} image, lsb {}, {capacity} bytes", args.lsb);

    println!(
        "{} ({}x{}) can hold {} bytes at lsb {}",
        args.image.to_string_lossy().bold(),
        width,
        height,
        capacity.to_string().green().bold(),
        args.lsb
    );

    if let Some(path) = &args.text {
        let len = fs::metadata(path)
            .with_context(|| {
                format!(
                    "Unable to read payload file: {}",
                    path.to_string_lossy().red().bold()
                )
            })?
            .len();
        let len = usize::try_from(len).context("Payload file is too large")?;

        check_capacity(width, height, len, args.lsb).map_err(report_capacity)?;
        println!(
            "{} ({} bytes) fits.",
            path.to_string_lossy().green().bold(),
            len
        );
    }

    Ok(())
}

fn load_grid(path: &Path) -> Result<RgbaImage> {
    let bytes = fs::read(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    let grid = decode_container(&bytes).with_context(|| {
        format!(
            "Unable to decode image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    debug!("loaded {} ({}x{})", path.display(), grid.width(), grid.height());
    Ok(grid)
}

/// 将容量不足转换为带颜色的用户提示，其余错误原样传递。
fn report_capacity(err: StegoError) -> anyhow::Error {
    match err {
        StegoError::CapacityExceeded {
            available_bytes,
            requested_bytes,
            lsb,
        } => anyhow::anyhow!(
            "Not enough space in the image to hide the payload at lsb {}. \nRequired: {}, Available: {}",
            lsb,
            requested_bytes.to_string().red().bold(),
            available_bytes.to_string().green().bold()
        ),
        other => other.into(),
    }
}

fn ensure_writable(dest: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 在 `source` 同目录下生成 `<prefix><文件名>` 形式的路径。
/// 给出 `extension` 时使用文件名主干并替换扩展名。
fn default_output_path(source: &Path, prefix: &str, extension: Option<&str>) -> PathBuf {
    let name = match extension {
        Some(ext) => {
            let stem = source.file_stem().unwrap_or_default().to_string_lossy();
            format!("{prefix}{stem}.{ext}")
        }
        None => {
            let file_name = source.file_name().unwrap_or_default().to_string_lossy();
            format!("{prefix}{file_name}")
        }
    };
    source.with_file_name(name)
}

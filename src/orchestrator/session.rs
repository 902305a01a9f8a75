//! 交互会话 - 编排层
//!
//! ## 职责
//!
//! 本模块驱动终端上的一轮轮"搜索 → 选择 → 确认 → 选卷 → 下载"。
//!
//! ## 核心功能
//!
//! 1. **搜索**：委托 `SearchFlow` 完成抓取与分类
//! 2. **选择**：打印编号列表，读取序号或 `exit`
//! 3. **确认**：`Y/n`，空输入视为确认
//! 4. **选卷**：多于一个链接时读取序号、`all` 或空输入（全部）
//! 5. **下载**：委托 `DownloadDispatcher` 并发执行
//!
//! 无效输入只会重新提示，不会终止会话。

use crate::clients::{DownloadSink, PageFetcher};
use crate::error::{AppError, AppResult};
use crate::models::{SearchResult, VolumeLink};
use crate::services::{DispatchReport, DownloadDispatcher};
use crate::utils::logging::{log_dispatch_start, print_dispatch_stats, truncate_text};
use crate::workflow::{SearchCtx, SearchFlow};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// 分卷选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeChoice {
    All,
    /// 从 1 开始的卷号
    One(usize),
}

/// 单轮会话结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// 搜索没有结果
    NoResults,
    /// 用户输入 exit 或输入结束
    Exited,
    /// 用户拒绝下载
    Declined,
    /// 详情页没有下载链接
    NoTargets,
    /// 已完成下载分发
    Downloaded(DispatchReport),
}

/// 会话统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub rounds: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// 解析条目序号（1 开始），返回 0 开始的下标
pub fn parse_selection(input: &str, max: usize) -> AppResult<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= max => Ok(n - 1),
        _ => Err(AppError::invalid_selection(input.trim(), max)),
    }
}

/// 解析分卷选择：空输入与 `all` 表示全部
pub fn parse_volume_choice(input: &str, max: usize) -> AppResult<VolumeChoice> {
    let input = input.trim().to_lowercase();
    if input.is_empty() || input == "all" {
        return Ok(VolumeChoice::All);
    }
    parse_selection(&input, max).map(|idx| VolumeChoice::One(idx + 1))
}

/// 交互会话
pub struct Session<F: ?Sized, S: ?Sized, R, W> {
    flow: SearchFlow<F>,
    dispatcher: DownloadDispatcher<S>,
    download_root: PathBuf,
    input: R,
    output: W,
}

impl<F, S, R, W> Session<F, S, R, W>
where
    F: PageFetcher + ?Sized,
    S: DownloadSink + ?Sized + 'static,
    R: BufRead,
    W: Write,
{
    pub fn new(
        flow: SearchFlow<F>,
        dispatcher: DownloadDispatcher<S>,
        download_root: impl Into<PathBuf>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            flow,
            dispatcher,
            download_root: download_root.into(),
            input,
            output,
        }
    }

    /// 运行会话，直到用户不再搜索或输入结束
    pub async fn run(&mut self, keyword: Option<String>, page: u32) -> AppResult<SessionStats> {
        let mut stats = SessionStats::default();
        let mut next_keyword = keyword.filter(|k| !k.trim().is_empty());
        let mut page = page;

        loop {
            let raw_keyword = match next_keyword.take() {
                Some(keyword) => keyword,
                None => match self.prompt("Enter a search keyword: ")? {
                    Some(line) if !line.is_empty() => line,
                    Some(_) => continue,
                    None => break,
                },
            };

            let ctx = self.flow.context(&raw_keyword, page);
            let outcome = self.round(&ctx).await?;
            stats.rounds += 1;
            if let RoundOutcome::Downloaded(report) = outcome {
                stats.succeeded += report.succeeded;
                stats.failed += report.failed;
            }

            page = 1;
            if !self.confirm("\nSearch again? (y/N): ", false)? {
                break;
            }
        }

        Ok(stats)
    }

    /// 执行一轮：搜索、选择、确认、选卷、下载
    pub async fn round(&mut self, ctx: &SearchCtx) -> AppResult<RoundOutcome> {
        let buckets = match self.flow.search(ctx).await {
            Ok(buckets) => buckets,
            Err(AppError::NoResultsFound { .. }) => {
                writeln!(self.output, "No comics found.")?;
                return Ok(RoundOutcome::NoResults);
            }
            Err(e) => return Err(e),
        };

        let results: Vec<SearchResult> = buckets.flatten().into_iter().cloned().collect();
        for (idx, result) in results.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, result)?;
        }

        let Some(selected) = self.select_result(&results)? else {
            writeln!(self.output, "Exiting without downloading.")?;
            return Ok(RoundOutcome::Exited);
        };
        writeln!(
            self.output,
            "\nYou selected: {} ({}) - Size: {}",
            selected.display_text, selected.year, selected.size_label
        )?;

        if !self.confirm("Confirm download (Y/n): ", true)? {
            return Ok(RoundOutcome::Declined);
        }

        let links = match self.flow.resolve(ctx, selected).await {
            Ok(links) => links,
            Err(AppError::NoDownloadTargetsFound { .. }) => {
                writeln!(self.output, "Download links not found.")?;
                return Ok(RoundOutcome::NoTargets);
            }
            Err(e) => return Err(e),
        };

        writeln!(self.output, "Download links found:")?;
        for link in &links {
            writeln!(self.output, "{}. {}", link.volume_index, link.label(&selected.display_text))?;
        }

        let Some(chosen) = self.select_volumes(&links)? else {
            writeln!(self.output, "Exiting without downloading.")?;
            return Ok(RoundOutcome::Exited);
        };

        let targets = self.flow.plan_downloads(&self.download_root, selected, &chosen);
        let destination = self.flow.destination_dir(&self.download_root, selected);
        log_dispatch_start(targets.len(), self.dispatcher.concurrency(), &destination);
        info!("{} ⬇️ {}", ctx, truncate_text(&selected.display_text, 60));

        let report = self.dispatcher.dispatch(targets).await;
        print_dispatch_stats(&report);
        writeln!(self.output, "Download completed.")?;

        Ok(RoundOutcome::Downloaded(report))
    }

    /// 读取条目选择，`exit` 或输入结束时返回 None
    fn select_result<'a>(&mut self, results: &'a [SearchResult]) -> AppResult<Option<&'a SearchResult>> {
        loop {
            let Some(line) = self.prompt(
                "\nEnter the number of the comic you want to download or 'exit' to quit: ",
            )?
            else {
                return Ok(None);
            };
            if line.eq_ignore_ascii_case("exit") {
                return Ok(None);
            }
            match parse_selection(&line, results.len()) {
                Ok(idx) => return Ok(Some(&results[idx])),
                Err(e) => self.report_invalid(&e)?,
            }
        }
    }

    /// 读取分卷选择；只有一个链接时直接选中
    fn select_volumes<'a>(&mut self, links: &'a [VolumeLink]) -> AppResult<Option<Vec<&'a VolumeLink>>> {
        if links.len() == 1 {
            return Ok(Some(links.iter().collect()));
        }
        loop {
            let Some(line) = self.prompt(
                "\nEnter the number of the volume you want to download, 'all' or press Enter to download all volumes: ",
            )?
            else {
                return Ok(None);
            };
            match parse_volume_choice(&line, links.len()) {
                Ok(VolumeChoice::All) => return Ok(Some(links.iter().collect())),
                Ok(VolumeChoice::One(n)) => {
                    return Ok(Some(links.iter().filter(|l| l.volume_index == n).collect()))
                }
                Err(e) => self.report_invalid(&e)?,
            }
        }
    }

    fn report_invalid(&mut self, err: &AppError) -> AppResult<()> {
        warn!("{}", err);
        writeln!(self.output, "Invalid selection. Please try again.")?;
        Ok(())
    }

    /// 打印提示并读取一行（已去除首尾空白），输入结束时返回 None
    fn prompt(&mut self, message: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// 是/否确认，空输入取默认值
    fn confirm(&mut self, message: &str, default: bool) -> AppResult<bool> {
        let Some(line) = self.prompt(message)? else {
            return Ok(false);
        };
        Ok(match line.to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("1", 3).unwrap(), 0);
        assert_eq!(parse_selection(" 3 ", 3).unwrap(), 2);
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("4", 3).is_err());
        assert!(parse_selection("two", 3).is_err());
        assert!(parse_selection("-1", 3).is_err());
        assert!(parse_selection("1", 0).is_err());
    }

    #[test]
    fn test_parse_volume_choice() {
        assert_eq!(parse_volume_choice("", 3).unwrap(), VolumeChoice::All);
        assert_eq!(parse_volume_choice(" ALL ", 3).unwrap(), VolumeChoice::All);
        assert_eq!(parse_volume_choice("2", 3).unwrap(), VolumeChoice::One(2));
        assert!(matches!(
            parse_volume_choice("9", 3),
            Err(AppError::InvalidSelection { max: 3, .. })
        ));
    }
}

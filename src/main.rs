use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use securmask::{api, cli, config, error, notify};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, SecurMaskError};
use securmask_common::{
    DetectColumnsResponse, Error as ServiceError, MaskingWorkflow, SelectedFile, WorkflowPhase,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let server_url = cli.server.clone().unwrap_or_else(|| config.server_url.clone());

    match cli.command {
        Commands::Columns { file } => {
            println!("🔒 SecurMask - カラム検出\n");
            let client = api::ServiceClient::new(&server_url);
            let notifier = notify::TerminalNotifier::new(true);
            let mut workflow = MaskingWorkflow::new(server_url.clone());
            let file_meta = selected_file(&file)?;

            println!("[1/1] カラムを検出中...");
            let result = detect(&client, &file, cli.verbose).await;
            workflow.apply_detection(file_meta, result, &notifier);

            if workflow.phase() != WorkflowPhase::Uploaded {
                return Err(SecurMaskError::ServiceCall("カラム検出に失敗しました".into()));
            }

            println!();
            for column in workflow.columns() {
                println!("  - {}", column);
            }
        }

        Commands::Mask {
            file,
            columns,
            all,
            output,
            yes,
        } => {
            println!("🔒 SecurMask - データマスキング\n");
            let client = api::ServiceClient::new(&server_url);
            let notifier = notify::TerminalNotifier::new(yes);
            let mut workflow = MaskingWorkflow::new(server_url.clone());
            let file_meta = selected_file(&file)?;

            // 1. カラム検出
            println!("[1/3] カラムを検出中...");
            let result = detect(&client, &file, cli.verbose).await;
            workflow.apply_detection(file_meta, result, &notifier);
            if workflow.phase() != WorkflowPhase::Uploaded {
                return Err(SecurMaskError::ServiceCall("カラム検出に失敗しました".into()));
            }

            // 2. カラム選択
            if all {
                workflow.toggle_select_all();
            } else if let Some(names) = columns {
                for name in &names {
                    if !workflow.columns().contains(name) {
                        return Err(SecurMaskError::UnknownColumn(name.clone()));
                    }
                    workflow.toggle_column(name);
                }
            } else {
                let picks = dialoguer::MultiSelect::new()
                    .with_prompt("マスクするカラムを選択（スペースで切替、Enterで確定）")
                    .items(workflow.columns())
                    .interact()?;
                let names: Vec<String> = picks
                    .iter()
                    .map(|&i| workflow.columns()[i].clone())
                    .collect();
                for name in &names {
                    workflow.toggle_column(name);
                }
            }

            // 3. マスキング依頼
            let Some(request) = workflow.begin_masking(&notifier) else {
                // 未選択の警告は通知済み
                return Ok(());
            };
            println!("[2/3] {}カラムをマスキング中...", request.columns.len());
            let bar = spinner("Masking data...");
            let result = client
                .mask_data(&file, &request.columns_json())
                .await
                .map_err(|e| {
                    if cli.verbose {
                        eprintln!("mask_data: {}", e);
                    }
                    ServiceError::Transport(e.to_string())
                });
            bar.finish_and_clear();

            // 4. 結果反映とダウンロード
            println!("[3/3] 結果を取得中...");
            let Some(url) = workflow.finish_masking(result, &notifier) else {
                // 失敗時・確認拒否時は通知済み
                return Ok(());
            };
            let dest = output
                .unwrap_or_else(|| PathBuf::from(format!("masked_{}", api::file_name_of(&file))));
            client.download(&url, &dest).await?;
            println!("✔ 保存しました: {}", dest.display());
            println!("\n✅ マスキング完了");
        }

        Commands::Config { set_server } => match set_server {
            Some(url) => {
                let mut config = config;
                config.server_url = url;
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }
            None => {
                println!("server_url: {}", config.server_url);
            }
        },
    }

    Ok(())
}

/// カラム検出を実行し、通信エラーをワークフロー用のエラー型へ写す
async fn detect(
    client: &api::ServiceClient,
    file: &Path,
    verbose: bool,
) -> std::result::Result<DetectColumnsResponse, ServiceError> {
    client.detect_columns(file).await.map_err(|e| {
        if verbose {
            eprintln!("detect_columns: {}", e);
        }
        ServiceError::Transport(e.to_string())
    })
}

fn selected_file(path: &Path) -> Result<SelectedFile<PathBuf>> {
    if !path.exists() {
        return Err(SecurMaskError::FileNotFound(path.display().to_string()));
    }
    Ok(SelectedFile {
        handle: path.to_path_buf(),
        name: api::file_name_of(path),
    })
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

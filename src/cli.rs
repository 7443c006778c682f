use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "securmask")]
#[command(about = "SecurMask - スプレッドシートの機密カラムをマスキング", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// サービスのベースURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ファイルのカラムヘッダを検出して表示
    Columns {
        /// CSV/XLSXファイルのパス
        #[arg(required = true)]
        file: PathBuf,
    },

    /// カラムを選んでマスク済みファイルを取得
    Mask {
        /// CSV/XLSXファイルのパス
        #[arg(required = true)]
        file: PathBuf,

        /// マスク対象カラム（カンマ区切り。省略時は対話選択）
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// 全カラムをマスク
        #[arg(long)]
        all: bool,

        /// 出力先（デフォルト: masked_<入力ファイル名>）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ダウンロード確認をスキップ
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 設定の表示・更新
    Config {
        /// サービスのベースURLを保存
        #[arg(long)]
        set_server: Option<String>,
    },
}

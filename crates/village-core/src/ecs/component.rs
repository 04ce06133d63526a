/// シーンオブジェクトに付与できるデータのマーカートレイト
/// - `'static`: 参照を保持しない
/// - `Send + Sync`: World全体をスレッド間で受け渡せるようにする
pub trait Component: 'static + Send + Sync {}

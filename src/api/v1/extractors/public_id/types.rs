/*
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - 新しいリソースを足すときはここに Tag と alias を追加する
 */
use super::core::PublicId;

// blogs
pub enum BlogTag {}
pub type PublicBlogId = PublicId<BlogTag>;

// news
pub enum NewsTag {}
pub type PublicNewsId = PublicId<NewsTag>;

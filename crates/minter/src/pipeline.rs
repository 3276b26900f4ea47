//! Scrape → download → upload → mint, one post at a time

use std::fs;

use nft_sdk::{mint_nft, ChainRpc, NftMintParams};
use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::{
    config::MinterConfig,
    discovery::{discover_posts, DiscoveredPost},
    download::download_image,
    error::MinterResult,
    http::{ByteFetcher, PageFetcher},
    metadata::{create_metadata_json, describe_post},
    report,
    storage::{gateway_url, upload_image, upload_metadata, ContentStore},
};

/// Posts processed per run
pub const MAX_POSTS: usize = 5;

pub const NFT_NAME: &str = "Tweet NFT";
pub const NFT_SYMBOL: &str = "TNFT";

/// A post that made it on-chain
#[derive(Clone, Debug)]
pub struct MintedPost {
    pub post: DiscoveredPost,
    pub image_cid: String,
    pub metadata_cid: String,
    pub mint: Pubkey,
}

pub struct Pipeline<'a> {
    config: &'a MinterConfig,
    pages: &'a dyn PageFetcher,
    images: &'a dyn ByteFetcher,
    store: &'a dyn ContentStore,
    rpc: &'a dyn ChainRpc,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a MinterConfig,
        pages: &'a dyn PageFetcher,
        images: &'a dyn ByteFetcher,
        store: &'a dyn ContentStore,
        rpc: &'a dyn ChainRpc,
    ) -> Self {
        Self {
            config,
            pages,
            images,
            store,
            rpc,
        }
    }

    /// Mint the first `MAX_POSTS` image posts of `handle`.
    ///
    /// The first failure aborts the run; posts already minted stay minted.
    pub fn run(&self, handle: &str) -> MinterResult<Vec<MintedPost>> {
        let posts = discover_posts(self.pages, handle)?;

        let mut minted = Vec::new();
        for (index, post) in posts.into_iter().take(MAX_POSTS).enumerate() {
            minted.push(self.process(index, post)?);
        }

        Ok(minted)
    }

    fn process(&self, index: usize, post: DiscoveredPost) -> MinterResult<MintedPost> {
        info!(index, post_url = %post.post_url, "processing post");

        let image_path = self.config.work_dir.join(format!("tweet_image_{}.jpg", index));
        download_image(self.images, &post.image_url, &image_path)?;
        let image_cid = upload_image(self.store, &image_path)?;

        let metadata_path = create_metadata_json(
            &self.config.work_dir,
            NFT_NAME,
            &describe_post(&post),
            &image_cid,
            &post.post_url,
        )?;
        let metadata_cid = upload_metadata(self.store, &metadata_path)?;

        let outcome = mint_nft(
            self.rpc,
            &self.config.payer,
            &NftMintParams {
                name: NFT_NAME.to_string(),
                symbol: NFT_SYMBOL.to_string(),
                uri: gateway_url(&metadata_cid),
            },
        )?;

        report::success(&format!(
            "Minted NFT for tweet {}: {}",
            post.post_url, outcome.mint
        ));
        fs::remove_file(&image_path)?;

        Ok(MintedPost {
            post,
            image_cid,
            metadata_cid,
            mint: outcome.mint,
        })
    }
}

use crate::{
    clients::ApiTransport,
    error::{ApiError, Result, TransportError},
    models::Post,
};
use tracing::{debug, error, info};

const POSTS_PATH: &str = "posts";

#[derive(Debug, Clone)]
pub struct PostClient {
    transport: ApiTransport,
}

impl PostClient {
    /// Create a new PostClient on top of a shared transport
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// Create a new PostClient with its own transport for the given base URL
    pub fn connect(base_url: &str) -> Result<Self> {
        info!("Using post service at: {}", base_url);
        Ok(Self::new(ApiTransport::new(base_url)?))
    }

    fn post_path(post_id: u32) -> String {
        format!("{}/{}", POSTS_PATH, post_id)
    }

    /// Fetch every post in the collection
    pub async fn fetch_all(&self) -> Result<Vec<Post>> {
        debug!("Fetching posts");

        let posts: Vec<Post> = self
            .transport
            .get_json(POSTS_PATH)
            .await
            .map_err(|e| {
                error!("Error fetching posts: {}", e);
                ApiError::Fetch {
                    resource: POSTS_PATH,
                    source: e,
                }
            })?;

        info!("Fetched {} posts", posts.len());
        Ok(posts)
    }

    /// Delete a post by ID; `true` once the server acknowledges it
    pub async fn delete(&self, post_id: u32) -> Result<bool> {
        let url = self.transport.endpoint(&Self::post_path(post_id));
        debug!("Deleting post {} at {}", post_id, url);

        let request = self.transport.client().delete(&url);
        let response = self
            .transport
            .execute(request, &url)
            .await
            .map_err(|e| {
                error!("Error deleting post {}: {}", post_id, e);
                ApiError::Delete {
                    id: post_id,
                    source: e,
                }
            })?;

        info!("Deleted post {}", post_id);
        Ok(response.status().is_success())
    }

    /// Replace a post wholesale
    pub async fn update(&self, post_id: u32, post: &Post) -> Result<bool> {
        let url = self.transport.endpoint(&Self::post_path(post_id));
        debug!("Updating post {} at {}", post_id, url);

        let request = self.transport.client().put(&url).json(post);
        let response = self
            .transport
            .execute(request, &url)
            .await
            .map_err(|e| {
                error!("Error updating post {}: {}", post_id, e);
                ApiError::Update {
                    id: post_id,
                    source: e,
                }
            })?;

        info!("Updated post {}", post_id);
        Ok(response.status().is_success())
    }

    /// Create a post and return the server's copy with its assigned ID
    ///
    /// A success status whose body is not a post is still an error: the
    /// caller never receives a success flag without the created post.
    pub async fn create(&self, post: &Post) -> Result<(bool, Post)> {
        let url = self.transport.endpoint(POSTS_PATH);
        debug!("Creating post '{}' for user {}", post.title, post.user_id);

        let wrap = |e: TransportError| {
            error!("Error creating post: {}", e);
            ApiError::Create { source: e }
        };

        let request = self.transport.client().post(&url).json(post);
        let response = self.transport.execute(request, &url).await.map_err(wrap)?;
        let success = response.status().is_success();
        let created: Post = ApiTransport::read_json(response).await.map_err(wrap)?;

        match created.id {
            Some(id) => info!("Created post {}", id),
            None => debug!("Server returned created post without an ID"),
        }
        Ok((success, created))
    }
}

//! Public URLs for objects in Supabase Storage

/// Client for Supabase Storage
#[derive(Debug, Clone)]
pub struct StorageClient {
    /// The base URL for the Supabase project
    url: String,
}

/// Client for a specific storage bucket
#[derive(Debug, Clone)]
pub struct BucketClient<'a> {
    /// Reference to the storage client
    storage: &'a StorageClient,

    /// The bucket ID
    bucket_id: String,
}

impl StorageClient {
    /// Create a new StorageClient
    pub(crate) fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Get a client for a specific bucket
    pub fn from(&self, bucket_id: &str) -> BucketClient {
        BucketClient {
            storage: self,
            bucket_id: bucket_id.to_string(),
        }
    }
}

impl<'a> BucketClient<'a> {
    /// Get the public URL for a file
    pub fn get_public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.storage.url,
            self.bucket_id,
            path.trim_start_matches('/')
        )
    }

    /// Resolve an optional image path, treating a blank path as "no image"
    pub fn image_url(&self, path: Option<&str>) -> Option<String> {
        path.map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| self.get_public_url(p))
    }
}

use crate::model::product::{Product, Review};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::MongoStore;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use tracing::{error, info};

/// Sort keys accepted by the public catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    Rating,
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
}

impl ProductSort {
    pub fn parse(s: &str) -> Option<ProductSort> {
        match s {
            "price-asc" => Some(ProductSort::PriceAsc),
            "price-desc" => Some(ProductSort::PriceDesc),
            "rating" => Some(ProductSort::Rating),
            "newest" => Some(ProductSort::Newest),
            "oldest" => Some(ProductSort::Oldest),
            "name-asc" => Some(ProductSort::NameAsc),
            "name-desc" => Some(ProductSort::NameDesc),
            _ => None,
        }
    }

    pub fn to_sort_doc(self) -> Document {
        match self {
            ProductSort::PriceAsc => doc! { "price": 1 },
            ProductSort::PriceDesc => doc! { "price": -1 },
            ProductSort::Rating => doc! { "rating": -1 },
            ProductSort::Newest => doc! { "created_at": -1 },
            ProductSort::Oldest => doc! { "created_at": 1 },
            ProductSort::NameAsc => doc! { "name": 1 },
            ProductSort::NameDesc => doc! { "name": -1 },
        }
    }
}

/// Filters for the public catalog listing.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<ProductSort>,
    pub page: u64,
    pub limit: i64,
}

/// Availability clause every public listing carries: inactive, sold-flagged
/// or out-of-stock products never appear.
pub fn public_availability_filter() -> Document {
    doc! {
        "is_active": true,
        "is_sold": false,
        "quantity": { "$gt": 0_i64 },
    }
}

/// Builds the full listing filter. Search is case-insensitive substring
/// matching over name/description/category/brand/tags, not ranked relevance.
pub fn build_listing_filter(query: &ProductQuery) -> Document {
    let mut filter = public_availability_filter();

    if let Some(ref search) = query.search {
        // Escaped so the user types a substring, not a regex
        let regex = doc! { "$regex": regex_escape(search), "$options": "i" };
        filter.insert(
            "$or",
            vec![
                doc! { "name": regex.clone() },
                doc! { "description": regex.clone() },
                doc! { "category": regex.clone() },
                doc! { "brand": regex.clone() },
                doc! { "tags": regex },
            ],
        );
    }
    if let Some(ref category) = query.category {
        filter.insert("category", category.clone());
    }
    if let Some(ref brand) = query.brand {
        filter.insert("brand", brand.clone());
    }

    let mut price = Document::new();
    if let Some(min) = query.min_price {
        price.insert("$gte", min);
    }
    if let Some(max) = query.max_price {
        price.insert("$lte", max);
    }
    if !price.is_empty() {
        filter.insert("price", price);
    }

    filter
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> RepositoryResult<Product>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Product>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Product>>;
    async fn update(&self, id: ObjectId, product: Product) -> RepositoryResult<Product>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    /// Public listing: filtered page plus the total match count.
    async fn list_public(&self, query: &ProductQuery) -> RepositoryResult<(Vec<Product>, u64)>;
    async fn list_all(&self, page: u64, limit: i64) -> RepositoryResult<Vec<Product>>;
    async fn list_flagged(&self, flag: &str, limit: i64) -> RepositoryResult<Vec<Product>>;
    /// Atomically decrements stock; fails without writing when fewer than
    /// `quantity` units remain.
    async fn decrement_stock(&self, id: ObjectId, quantity: i64) -> RepositoryResult<()>;
    /// Adds stock back (cancellation path).
    async fn restore_stock(&self, id: ObjectId, quantity: i64) -> RepositoryResult<()>;
    async fn count_by_category(&self, category: &str) -> RepositoryResult<u64>;
    async fn count_by_brand(&self, brand: &str) -> RepositoryResult<u64>;
    /// Denormalization fix-up after a category rename.
    async fn rename_category(&self, old_name: &str, new_name: &str) -> RepositoryResult<u64>;
    /// Denormalization fix-up after a brand rename.
    async fn rename_brand(&self, old_name: &str, new_name: &str) -> RepositoryResult<u64>;
    async fn push_review(&self, id: ObjectId, review: Review) -> RepositoryResult<Product>;
    async fn find_by_name_ci(&self, name: &str) -> RepositoryResult<Option<Product>>;
}

pub struct MongoProductRepository {
    collection: mongodb::Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoProductRepository { collection: store.database().collection::<Product>("products") }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn create(&self, product: Product) -> RepositoryResult<Product> {
        let mut new_product = product;
        new_product.id = Some(ObjectId::new());
        if new_product.sku.is_empty() {
            new_product.sku = Product::generate_sku();
        }
        let now = chrono::Utc::now().to_rfc3339();
        new_product.created_at = Some(now.clone());
        new_product.updated_at = Some(now);

        match self.collection.insert_one(new_product.clone(), None).await {
            Ok(_) => {
                info!(product_id = ?new_product.id, "Product created");
                Ok(new_product)
            }
            Err(e) => {
                error!("Failed to create product: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Product> {
        match self.find_by_id(&id).await? {
            Some(product) => Ok(product),
            None => Err(RepositoryError::not_found(format!("Product not found for ID: {}", id))),
        }
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Product>> {
        let product = self
            .collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to fetch product: {}", e)))?;
        Ok(product)
    }

    async fn update(&self, id: ObjectId, mut product: Product) -> RepositoryResult<Product> {
        product.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let mut document = bson::to_document(&product)?;
        document.remove("_id");
        let update = doc! { "$set": document };
        match self.collection.update_one(doc! { "_id": id }, update, None).await {
            Ok(result) if result.matched_count > 0 => Ok(product),
            Ok(_) => Err(RepositoryError::not_found(format!("No product found for ID: {}", id))),
            Err(e) => {
                error!("Failed to update product: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(result) if result.deleted_count > 0 => {
                info!("Product deleted: {}", id);
                Ok(())
            }
            Ok(_) => Err(RepositoryError::not_found(format!("No product found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn list_public(&self, query: &ProductQuery) -> RepositoryResult<(Vec<Product>, u64)> {
        let filter = build_listing_filter(query);

        let total = self
            .collection
            .count_documents(filter.clone(), None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count products: {}", e)))?;

        let sort = query.sort.unwrap_or(ProductSort::Newest).to_sort_doc();
        let skip = query.page.saturating_sub(1) * query.limit.max(0) as u64;
        let options = mongodb::options::FindOptions::builder()
            .sort(sort)
            .skip(skip)
            .limit(query.limit)
            .build();

        let mut cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list products: {}", e)))?;

        let mut products = Vec::new();
        while let Some(result) = cursor.next().await {
            match result {
                Ok(product) => products.push(product),
                Err(e) => {
                    error!("Failed to deserialize product: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize product: {}",
                        e
                    )));
                }
            }
        }
        Ok((products, total))
    }

    async fn list_all(&self, page: u64, limit: i64) -> RepositoryResult<Vec<Product>> {
        let skip = page.saturating_sub(1) * limit.max(0) as u64;
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(limit)
            .build();
        let mut cursor = self
            .collection
            .find(None, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list products: {}", e)))?;

        let mut products = Vec::new();
        while let Some(result) = cursor.next().await {
            products.push(result.map_err(|e| {
                RepositoryError::serialization(format!("Failed to deserialize product: {}", e))
            })?);
        }
        Ok(products)
    }

    async fn list_flagged(&self, flag: &str, limit: i64) -> RepositoryResult<Vec<Product>> {
        let mut filter = public_availability_filter();
        filter.insert(flag, true);
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .build();
        let mut cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list flagged products: {}", e)))?;

        let mut products = Vec::new();
        while let Some(result) = cursor.next().await {
            products.push(result.map_err(|e| {
                RepositoryError::serialization(format!("Failed to deserialize product: {}", e))
            })?);
        }
        Ok(products)
    }

    async fn decrement_stock(&self, id: ObjectId, quantity: i64) -> RepositoryResult<()> {
        // Conditional atomic update: only decrements while enough stock
        // remains, so two concurrent checkouts cannot both take the last unit.
        let filter = doc! { "_id": id, "quantity": { "$gte": quantity } };
        let update = doc! { "$inc": { "quantity": -quantity } };
        match self.collection.update_one(filter, update, None).await {
            Ok(result) if result.modified_count > 0 => Ok(()),
            Ok(_) => Err(RepositoryError::validation(format!(
                "Insufficient stock for product {}",
                id
            ))),
            Err(e) => {
                error!("Failed to decrement stock: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn restore_stock(&self, id: ObjectId, quantity: i64) -> RepositoryResult<()> {
        let update = doc! { "$inc": { "quantity": quantity } };
        match self.collection.update_one(doc! { "_id": id }, update, None).await {
            Ok(result) if result.matched_count > 0 => Ok(()),
            Ok(_) => Err(RepositoryError::not_found(format!("No product found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn count_by_category(&self, category: &str) -> RepositoryResult<u64> {
        self.collection
            .count_documents(doc! { "category": category }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count products by category: {}", e)))
    }

    async fn count_by_brand(&self, brand: &str) -> RepositoryResult<u64> {
        self.collection
            .count_documents(doc! { "brand": brand }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count products by brand: {}", e)))
    }

    async fn rename_category(&self, old_name: &str, new_name: &str) -> RepositoryResult<u64> {
        let update = doc! { "$set": { "category": new_name } };
        let result = self
            .collection
            .update_many(doc! { "category": old_name }, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to propagate category rename: {}", e)))?;
        info!(old = old_name, new = new_name, count = result.modified_count, "Category rename propagated");
        Ok(result.modified_count)
    }

    async fn rename_brand(&self, old_name: &str, new_name: &str) -> RepositoryResult<u64> {
        let update = doc! { "$set": { "brand": new_name } };
        let result = self
            .collection
            .update_many(doc! { "brand": old_name }, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to propagate brand rename: {}", e)))?;
        info!(old = old_name, new = new_name, count = result.modified_count, "Brand rename propagated");
        Ok(result.modified_count)
    }

    async fn push_review(&self, id: ObjectId, review: Review) -> RepositoryResult<Product> {
        let mut product = self.get_by_id(id).await?;
        product.reviews.push(review);
        product.recompute_rating();
        self.update(id, product).await
    }

    async fn find_by_name_ci(&self, name: &str) -> RepositoryResult<Option<Product>> {
        let filter = doc! { "name": { "$regex": format!("^{}$", regex_escape(name)), "$options": "i" } };
        let product = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find product by name: {}", e)))?;
        Ok(product)
    }
}

/// Escapes regex metacharacters so user-supplied names match literally.
pub fn regex_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if "\\^$.|?*+()[]{}".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_filter_excludes_unavailable() {
        let filter = public_availability_filter();
        assert_eq!(filter.get_bool("is_active").unwrap(), true);
        assert_eq!(filter.get_bool("is_sold").unwrap(), false);
        let quantity = filter.get_document("quantity").unwrap();
        assert_eq!(quantity.get_i64("$gt").unwrap(), 0);
    }

    #[test]
    fn test_listing_filter_includes_search_and_price() {
        let query = ProductQuery {
            search: Some("sneaker".to_string()),
            min_price: Some(10.0),
            max_price: Some(100.0),
            ..ProductQuery::default()
        };
        let filter = build_listing_filter(&query);
        assert!(filter.get_array("$or").is_ok());
        let price = filter.get_document("price").unwrap();
        assert_eq!(price.get_f64("$gte").unwrap(), 10.0);
        assert_eq!(price.get_f64("$lte").unwrap(), 100.0);
        // availability clause still present alongside search
        assert_eq!(filter.get_bool("is_active").unwrap(), true);
    }

    #[test]
    fn test_listing_filter_escapes_search_metacharacters() {
        let query = ProductQuery {
            search: Some("c++ (sale".to_string()),
            ..ProductQuery::default()
        };
        let filter = build_listing_filter(&query);
        let clauses = filter.get_array("$or").unwrap();
        let name_clause = clauses[0].as_document().unwrap();
        let regex = name_clause.get_document("name").unwrap();
        // Metacharacters arrive escaped, so "c++ (sale" is a valid pattern
        // that matches only the literal substring
        assert_eq!(regex.get_str("$regex").unwrap(), "c\\+\\+ \\(sale");
        assert_eq!(regex.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(ProductSort::parse("price-asc"), Some(ProductSort::PriceAsc));
        assert_eq!(ProductSort::parse("name-desc"), Some(ProductSort::NameDesc));
        assert_eq!(ProductSort::parse("relevance"), None);
    }

    #[test]
    fn test_regex_escape() {
        assert_eq!(regex_escape("C++ (new)"), "C\\+\\+ \\(new\\)");
        assert_eq!(regex_escape("plain"), "plain");
    }
}

//! Java source trees written into temporary directories.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary source tree; removed when dropped.
pub struct JavaTree {
    dir: TempDir,
}

impl JavaTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn file(self, rel: &str, content: &str) -> Self {
        self.write(rel, content);
        self
    }

    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.path().join(rel)).expect("create dir");
        self
    }

    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write fixture file");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.path().join(rel)
    }
}

impl Default for JavaTree {
    fn default() -> Self {
        Self::new()
    }
}

pub const FOO_WITH_IMPORTS: &str = "package p;\nimport java.util.List; import q.Bar;\n\npublic class Foo {\n}\n";

pub const ALL_KINDS: &str = "package pkg;\n\nclass A extends B implements C {\n    D d;\n    E m(F f) {\n        return new G();\n    }\n}\n";

pub const ONLY_JDK: &str = "package p;\n\nimport java.util.Map;\n\npublic class Plain {\n    private String name;\n    private Map<String, Integer> counts;\n\n    public int size(int factor) {\n        return name.length() * factor;\n    }\n}\n";

/// A small multi-package project with cross-package references.
pub fn shop_project() -> JavaTree {
    JavaTree::new()
        .file(
            "src/shop/model/Item.java",
            "package shop.model;\n\npublic class Item {\n    private String name;\n    private java.math.BigDecimal price;\n}\n",
        )
        .file(
            "src/shop/model/Cart.java",
            "package shop.model;\n\nimport java.util.ArrayList;\nimport java.util.List;\n\npublic class Cart {\n    private List<Item> items = new ArrayList<>();\n    private Discount discount;\n\n    public void add(Item item) {\n        items.add(item);\n    }\n\n    public Receipt checkout(PaymentGateway gateway) {\n        return new Receipt(this, gateway.charge(this));\n    }\n}\n",
        )
        .file(
            "src/shop/model/Discount.java",
            "package shop.model;\n\npublic interface Discount extends Comparable<Discount> {\n    int percent();\n}\n",
        )
        .file(
            "src/shop/model/Receipt.java",
            "package shop.model;\n\nimport shop.pay.Confirmation;\n\npublic class Receipt {\n    private final Cart cart;\n    private final Confirmation confirmation;\n\n    public Receipt(Cart cart, Confirmation confirmation) {\n        this.cart = cart;\n        this.confirmation = confirmation;\n    }\n}\n",
        )
        .file(
            "src/shop/pay/PaymentGateway.java",
            "package shop.pay;\n\nimport shop.model.Cart;\n\npublic interface PaymentGateway {\n    Confirmation charge(Cart cart);\n}\n",
        )
        .file(
            "src/shop/pay/Confirmation.java",
            "package shop.pay;\n\npublic class Confirmation {\n    private final String id;\n\n    public Confirmation(String id) {\n        this.id = id;\n    }\n}\n",
        )
        .file(
            "src/shop/pay/StripeGateway.java",
            "package shop.pay;\n\nimport shop.model.Cart;\nimport shop.audit.*;\n\npublic class StripeGateway implements PaymentGateway, AutoCloseable {\n    private final AuditLog log = new AuditLog();\n\n    @Override\n    public Confirmation charge(Cart cart) {\n        log.record(cart);\n        return new Confirmation(\"ok\");\n    }\n\n    @Override\n    public void close() {}\n}\n",
        )
        .file(
            "src/shop/audit/AuditLog.java",
            "package shop.audit;\n\nimport shop.model.Cart;\n\npublic class AuditLog {\n    public void record(Cart cart) {}\n}\n",
        )
        .file("README.md", "# shop\n")
}

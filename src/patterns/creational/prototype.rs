//! Prototype: copy objects, including ones with internal back references,
//! without depending on their concrete types.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// Points back at the prototype that owns it.
#[derive(Debug)]
pub struct ComponentWithBackReference {
    prototype: Weak<Prototype>,
}

impl ComponentWithBackReference {
    pub fn prototype(&self) -> Option<Rc<Prototype>> {
        self.prototype.upgrade()
    }
}

#[derive(Debug)]
pub struct Prototype {
    pub primitive: i64,
    pub component: Box<DateTime<Utc>>,
    pub circular_reference: Rc<ComponentWithBackReference>,
}

impl Prototype {
    /// The back reference is wired to the new object before it is returned.
    pub fn new(primitive: i64, component: DateTime<Utc>) -> Rc<Self> {
        Rc::new_cyclic(|this| Prototype {
            primitive,
            component: Box::new(component),
            circular_reference: Rc::new(ComponentWithBackReference {
                prototype: this.clone(),
            }),
        })
    }

    /// Deep copy: the component gets its own allocation and the
    /// back-referencing component points to the copy, not to `self`.
    pub fn clone_prototype(&self) -> Rc<Self> {
        Self::new(self.primitive, *self.component)
    }
}

pub fn client_code(console: &dyn Console) {
    let p1 = Prototype::new(245, Utc::now());
    let p2 = p1.clone_prototype();

    if p1.primitive == p2.primitive {
        console.write_line("Primitive field values have been carried over to a clone. Yay!");
    } else {
        console.write_line("Primitive field values have not been copied. Booo!");
    }

    if std::ptr::eq(p1.component.as_ref(), p2.component.as_ref()) {
        console.write_line("Simple component has not been cloned. Booo!");
    } else {
        console.write_line("Simple component has been cloned. Yay!");
    }

    if Rc::ptr_eq(&p1.circular_reference, &p2.circular_reference) {
        console.write_line("Component with back reference has not been cloned. Booo!");
    } else {
        console.write_line("Component with back reference has been cloned. Yay!");
    }

    let linked_to_clone = p2
        .circular_reference
        .prototype()
        .is_some_and(|owner| Rc::ptr_eq(&owner, &p2));
    if linked_to_clone {
        console.write_line("Component with back reference is linked to the clone. Yay!");
    } else {
        console.write_line("Component with back reference is linked to original object. Booo!");
    }
}

// Shapes

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeBase {
    pub x: i32,
    pub y: i32,
    pub color: String,
}

pub trait Shape: fmt::Debug {
    fn base(&self) -> &ShapeBase;
    fn area(&self) -> f64;
    fn clone_box(&self) -> Box<dyn Shape>;

    /// Every field, in a form comparable across shape types.
    fn describe(&self) -> String;
}

impl Clone for Box<dyn Shape> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub base: ShapeBase,
    pub width: u32,
    pub height: u32,
}

impl Shape for Rectangle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        format!(
            "Rectangle at ({}, {}) {} {}x{}",
            self.base.x, self.base.y, self.base.color, self.width, self.height
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub base: ShapeBase,
    pub radius: u32,
}

impl Shape for Circle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn area(&self) -> f64 {
        std::f64::consts::PI * f64::from(self.radius).powi(2)
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        format!(
            "Circle at ({}, {}) {} r={}",
            self.base.x, self.base.y, self.base.color, self.radius
        )
    }
}

fn same_object(a: &dyn Shape, b: &dyn Shape) -> bool {
    std::ptr::eq(
        a as *const dyn Shape as *const (),
        b as *const dyn Shape as *const (),
    )
}

/// Clones a list of shapes through the trait and reports on every copy.
pub fn clone_and_compare(shapes: &[Box<dyn Shape>], console: &dyn Console) -> Vec<Box<dyn Shape>> {
    let copies: Vec<Box<dyn Shape>> = shapes.iter().map(|shape| shape.clone_box()).collect();

    for (i, (original, copy)) in shapes.iter().zip(&copies).enumerate() {
        if same_object(original.as_ref(), copy.as_ref()) {
            console.write_line(&format!("{}: Shape objects are the same (booo!)", i));
            continue;
        }
        if original.describe() == copy.describe() {
            console.write_line(&format!(
                "{}: Shapes are different objects (yay!) and they are identical (yay!)",
                i
            ));
        } else {
            console.write_line(&format!(
                "{}: Shape objects are different but not identical (booo!)",
                i
            ));
        }
    }

    copies
}

pub fn shapes_client_code(console: &dyn Console) {
    let circle = Circle {
        base: ShapeBase {
            x: 10,
            y: 20,
            color: "red".to_string(),
        },
        radius: 15,
    };
    let rectangle = Rectangle {
        base: ShapeBase {
            x: 0,
            y: 0,
            color: "blue".to_string(),
        },
        width: 10,
        height: 20,
    };

    let shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(circle.clone()),
        circle.clone_box(),
        Box::new(rectangle),
    ];

    clone_and_compare(&shapes, console);
}

pub struct PrototypeDemo;

#[async_trait]
impl Demo for PrototypeDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "prototype",
            title: "Prototype",
            category: PatternCategory::Creational,
            summary: "Clones objects, even complex ones, without coupling to their specific classes",
            complexity: 1,
            popularity: 2,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        client_code(console.as_ref());
        console.blank_line();
        shapes_client_code(console.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::BufferConsole;

    #[test]
    fn test_back_reference_points_to_owner() {
        let original = Prototype::new(1, Utc::now());
        let owner = original.circular_reference.prototype().unwrap();
        assert!(Rc::ptr_eq(&owner, &original));
    }

    #[test]
    fn test_clone_is_deep_and_relinked() {
        let original = Prototype::new(245, Utc::now());
        let copy = original.clone_prototype();

        assert_eq!(copy.primitive, 245);
        assert_eq!(copy.component, original.component);
        assert!(!std::ptr::eq(original.component.as_ref(), copy.component.as_ref()));
        assert!(!Rc::ptr_eq(&original.circular_reference, &copy.circular_reference));

        let copy_owner = copy.circular_reference.prototype().unwrap();
        assert!(Rc::ptr_eq(&copy_owner, &copy));
        assert!(!Rc::ptr_eq(&copy_owner, &original));
    }

    #[test]
    fn test_client_code_reports_only_successes() {
        let console = BufferConsole::new();
        client_code(&console);

        let lines = console.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| line.ends_with("Yay!")));
    }

    #[test]
    fn test_shape_clones_are_distinct_but_equal() {
        let console = BufferConsole::new();
        let shapes: Vec<Box<dyn Shape>> = vec![Box::new(Circle {
            base: ShapeBase {
                x: 1,
                y: 2,
                color: "green".to_string(),
            },
            radius: 3,
        })];

        let copies = clone_and_compare(&shapes, &console);
        assert_eq!(copies[0].base(), shapes[0].base());
        assert_eq!(copies[0].area(), shapes[0].area());
        assert_eq!(
            console.lines(),
            vec!["0: Shapes are different objects (yay!) and they are identical (yay!)"]
        );
    }
}

mod fields;
mod pipeline;
mod polymorphism;
mod shapes;

use anyhow::Context;
use idgraph::{Graph, GraphConfig, Grid, IdGeneratorKind, PropertyGraph, PropertyValue, VertexId};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("idgraph v{}", idgraph::version());
    println!("==========================================");
    println!();

    demo_topology()?;
    demo_properties()?;
    demo_grid()?;
    Ok(())
}

fn demo_topology() -> anyhow::Result<()> {
    println!("=== Demo 1: Topology ===");
    let config = GraphConfig::uniform(IdGeneratorKind::List);
    let mut graph = Graph::with_config(&config);

    // Axis of ten internodes
    let mut previous = graph.add_vertex(None)?;
    for _ in 0..9 {
        let next = graph.add_vertex(None)?;
        graph.add_edge(previous, next, None)?;
        previous = next;
    }
    println!(
        "✓ Built axis: {} vertices, {} edges",
        graph.nb_vertices(),
        graph.nb_edges()
    );

    let middle = VertexId::new(5);
    println!(
        "✓ Vertex {}: in {:?}, out {:?}",
        middle,
        graph.in_neighbors(middle)?,
        graph.out_neighbors(middle)?
    );

    let removed = graph.remove_vertex(middle)?;
    println!("✓ Pruned {} with {} edges", middle, removed.len());

    let reused = graph.add_vertex(None)?;
    println!("✓ Next vertex reuses id {}", reused);

    let (trans_vid, trans_eid) = graph.extend_with_self()?;
    println!(
        "✓ Duplicated topology: +{} vertices, +{} edges",
        trans_vid.len(),
        trans_eid.len()
    );
    println!();
    Ok(())
}

fn demo_properties() -> anyhow::Result<()> {
    println!("=== Demo 2: Properties ===");
    let mut plant: PropertyGraph = PropertyGraph::new();
    plant.add_vertex_property("organ", None)?;
    plant.add_edge_property("length", None)?;
    plant.add_graph_property("species", Some("Malus domestica".into()))?;

    let trunk = plant.add_vertex(None)?;
    let branch = plant.add_vertex(None)?;
    let leaf = plant.add_vertex(None)?;
    let e1 = plant.add_edge(trunk, branch, None)?;
    let e2 = plant.add_edge(branch, leaf, None)?;

    let organs = plant.vertex_property_mut("organ")?;
    organs.insert(trunk, "trunk".into());
    organs.insert(branch, "branch".into());
    organs.insert(leaf, "leaf".into());

    let lengths = plant.edge_property_mut("length")?;
    lengths.insert(e1, PropertyValue::from(1.5));
    lengths.insert(e2, PropertyValue::from(0.2));

    println!(
        "✓ Plant of {} organs, species {}",
        plant.nb_vertices(),
        plant.graph_property("species")?
    );

    plant.remove_vertex(leaf)?;
    println!(
        "✓ After leaf fall: {} organ values, {} length values",
        plant.vertex_property("organ")?.len(),
        plant.edge_property("length")?.len()
    );

    let copy: PropertyGraph = PropertyGraph::copy_of(&plant).context("copying plant")?;
    println!(
        "✓ Copy carries properties: {:?}",
        copy.vertex_property_names().collect::<Vec<_>>()
    );
    println!();
    Ok(())
}

fn demo_grid() -> anyhow::Result<()> {
    println!("=== Demo 3: Grid ===");
    let grid = Grid::new([4, 3, 2])?;
    let index = grid.index(&[3, 2, 1])?;
    println!("✓ Grid {:?} has {} cells", grid.shape(), grid.len());
    println!("✓ Cell [3, 2, 1] -> {} -> {:?}", index, grid.coordinates(index)?);
    Ok(())
}
